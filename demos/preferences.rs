//! Track what a large population likes with one packed flag field.
//!
//! Run with `cargo run --example preferences`.

use anyhow::{Context, Result};
use flagfield::{FlagField, FlagFieldConfig};

const LIKES_CATS: u8 = 0;
const LIKES_DOGS: u8 = 1;
const LIKES_RATS: u8 = 2;
const LIKES_RED: u8 = 3;
const LIKES_BLUE: u8 = 4;
const LIKES_GREEN: u8 = 5;
const LIKES_BURGERS: u8 = 6;
const LIKES_FRIES: u8 = 7;
const LIKES_HOTDOGS: u8 = 8;

const CONFIG: &str = r#"{ "field_width": 9, "record_count": 1000000 }"#;

fn main() -> Result<()> {
    let config = FlagFieldConfig::from_json(CONFIG).context("parsing population config")?;
    let mut people: FlagField = FlagField::from_config(&config)?;

    for person in 0..people.len() {
        if person % 3 == 0 {
            people.set_fields(person, &[LIKES_CATS, LIKES_BLUE])?;
        }
        if person % 5 == 0 {
            people.set_fields(person, &[LIKES_DOGS, LIKES_BURGERS, LIKES_FRIES])?;
        }
        if person % 7 == 0 {
            people.set(person, LIKES_RATS)?;
        }
    }
    people.unset_fields(0, &[LIKES_RATS, LIKES_FRIES])?;

    let pet_people = (0..people.len())
        .filter(|&p| matches!(people.any_set(p, &[LIKES_CATS, LIKES_DOGS, LIKES_RATS]), Ok(true)))
        .count();
    let fast_food = (0..people.len())
        .filter(|&p| matches!(people.all_set(p, &[LIKES_BURGERS, LIKES_FRIES]), Ok(true)))
        .count();
    let colorless = (0..people.len())
        .filter(|&p| matches!(people.any_set(p, &[LIKES_RED, LIKES_BLUE, LIKES_GREEN]), Ok(false)))
        .count();

    println!("{} people, {} flags each", people.len(), people.field_width());
    println!("storage: {} bytes", people.memory_usage());
    println!("likes some pet: {}", pet_people);
    println!("likes burgers and fries: {}", fast_food);
    println!("likes no colors: {}", colorless);
    println!("person 0 likes fields {:?}", people.set_fields_of(0)?);
    println!("person 1 likes hotdogs: {}", people.is_set(1, LIKES_HOTDOGS)?);

    if let Err(err) = people.is_set(people.len(), LIKES_CATS) {
        println!("past the end: {}", err);
    }

    Ok(())
}
