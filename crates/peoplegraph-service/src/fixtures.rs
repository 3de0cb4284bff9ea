//! Random attribute values for newly created people.

use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PersonFixture;

/// First names a generated person can have.
pub const FIRST_NAMES: [&str; 8] = [
    "Camilo",
    "Laura",
    "Andrés",
    "María",
    "Sofía",
    "Carlos",
    "Valentina",
    "Daniel",
];

/// Cities a generated person can live in.
pub const CITY_NAMES: [&str; 5] = ["Bogotá", "Medellín", "Cali", "Barranquilla", "Cartagena"];

/// Exclusive upper bound for generated person ids.
pub const MAX_PERSON_ID: i64 = 10_000;
/// Youngest generated age.
pub const MIN_AGE: i64 = 18;
/// Width of the generated age range, starting at [`MIN_AGE`].
pub const AGE_SPAN: i64 = 80;

/// Source of attribute values for the create-person operation.
pub trait FixtureSource: Send + Sync {
    fn next_person(&self) -> PersonFixture;
}

/// Draws one fixture from `rng`.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> PersonFixture {
    PersonFixture {
        id: rng.random_range(0..MAX_PERSON_ID),
        name: FIRST_NAMES[rng.random_range(0..FIRST_NAMES.len())].to_string(),
        age: MIN_AGE + rng.random_range(0..AGE_SPAN),
        city_name: CITY_NAMES[rng.random_range(0..CITY_NAMES.len())].to_string(),
    }
}

/// Non-deterministic fixtures from the thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFixtures;

impl FixtureSource for RandomFixtures {
    fn next_person(&self) -> PersonFixture {
        generate_with(&mut rand::rng())
    }
}

/// Reproducible fixtures from a seeded RNG.
pub struct SeededFixtures {
    rng: Mutex<StdRng>,
}

impl SeededFixtures {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl FixtureSource for SeededFixtures {
    fn next_person(&self) -> PersonFixture {
        generate_with(&mut *self.rng.lock())
    }
}

/// Always yields the same fixture.
#[derive(Debug, Clone)]
pub struct FixedFixture(pub PersonFixture);

impl FixtureSource for FixedFixture {
    fn next_person(&self) -> PersonFixture {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_values_stay_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let f = generate_with(&mut rng);
            assert!((0..10_000).contains(&f.id), "id {}", f.id);
            assert!((18..=98).contains(&f.age), "age {}", f.age);
            assert!(FIRST_NAMES.contains(&f.name.as_str()));
            assert!(CITY_NAMES.contains(&f.city_name.as_str()));
        }
    }

    #[test]
    fn every_pool_entry_is_reachable() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut names = std::collections::HashSet::new();
        let mut cities = std::collections::HashSet::new();
        for _ in 0..2_000 {
            let f = generate_with(&mut rng);
            names.insert(f.name);
            cities.insert(f.city_name);
        }
        assert_eq!(names.len(), FIRST_NAMES.len());
        assert_eq!(cities.len(), CITY_NAMES.len());
    }

    #[test]
    fn seeded_fixtures_repeat_for_same_seed() {
        let a = SeededFixtures::new(99);
        let b = SeededFixtures::new(99);
        for _ in 0..10 {
            assert_eq!(a.next_person(), b.next_person());
        }
    }

    #[test]
    fn fixed_fixture_is_constant() {
        let fixed = FixedFixture(PersonFixture {
            id: 42,
            name: "Camilo".to_string(),
            age: 30,
            city_name: "Bogotá".to_string(),
        });
        assert_eq!(fixed.next_person(), fixed.next_person());
        assert_eq!(fixed.next_person().id, 42);
    }

    #[test]
    fn random_fixtures_stay_in_bounds() {
        let f = RandomFixtures.next_person();
        assert!((0..MAX_PERSON_ID).contains(&f.id));
        assert!((MIN_AGE..MIN_AGE + AGE_SPAN).contains(&f.age));
    }
}
