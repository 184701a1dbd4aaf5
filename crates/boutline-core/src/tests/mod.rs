use crate::*;

mod align;

pub(crate) const BASIC_CSV: &str = include_str!("../../../../fixtures/bouts/basic.csv");
pub(crate) const FIRST_FIGHT_CSV: &str = include_str!("../../../../fixtures/bouts/first_fight.csv");

pub(crate) fn load(text: &str) -> Dataset {
    Engine::new().load_bouts_sync(text).unwrap()
}
