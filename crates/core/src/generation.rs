//! Static generation ranges over the national dex number.

use serde::Serialize;

use crate::error::LookupError;

/// A named, inclusive range of dex ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub key: &'static str,
    pub start: u32,
    pub end: u32,
    pub name: &'static str,
}

const GENERATIONS: [Generation; 9] = [
    Generation { key: "1", start: 1, end: 151, name: "Generación I (Kanto)" },
    Generation { key: "2", start: 152, end: 251, name: "Generación II (Johto)" },
    Generation { key: "3", start: 252, end: 386, name: "Generación III (Hoenn)" },
    Generation { key: "4", start: 387, end: 493, name: "Generación IV (Sinnoh)" },
    Generation { key: "5", start: 494, end: 649, name: "Generación V (Teselia)" },
    Generation { key: "6", start: 650, end: 721, name: "Generación VI (Kalos)" },
    Generation { key: "7", start: 722, end: 809, name: "Generación VII (Alola)" },
    Generation { key: "8", start: 810, end: 905, name: "Generación VIII (Galar)" },
    Generation { key: "9", start: 906, end: 1025, name: "Generación IX (Paldea)" },
];

impl Generation {
    /// All generations in key order.
    pub fn all() -> &'static [Generation] {
        &GENERATIONS
    }

    /// Resolve a generation key ("1".."9"). Surrounding whitespace is ignored.
    pub fn lookup(key: &str) -> Result<&'static Generation, LookupError> {
        let key = key.trim();
        GENERATIONS
            .iter()
            .find(|g| g.key == key)
            .ok_or_else(|| LookupError::UnknownGeneration(key.to_string()))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.start <= id && id <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_key() {
        let g = Generation::lookup("1").unwrap();
        assert_eq!((g.start, g.end), (1, 151));
        assert!(g.name.contains("Kanto"));
    }

    #[test]
    fn lookup_unknown_key() {
        assert_eq!(
            Generation::lookup("99"),
            Err(LookupError::UnknownGeneration("99".to_string()))
        );
    }

    #[test]
    fn ranges_are_contiguous() {
        let all = Generation::all();
        assert_eq!(all[0].start, 1);
        for pair in all.windows(2) {
            assert_eq!(pair[0].end + 1, pair[1].start);
        }
    }

    #[test]
    fn contains_is_inclusive() {
        let g = Generation::lookup("2").unwrap();
        assert!(g.contains(152));
        assert!(g.contains(251));
        assert!(!g.contains(151));
        assert!(!g.contains(252));
    }
}
