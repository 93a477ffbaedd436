use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LookupError;

/// One entry of the listing endpoint: a name plus the URL of its full record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub name: String,
    pub url: String,
}

/// A fully fetched catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub types: Vec<PokemonType>,
    /// Hectograms (tenths of a kilogram).
    pub weight: u32,
    /// Decimetres (tenths of a metre).
    pub height: u32,
    pub sprite_url: Option<String>,
    pub base_experience: Option<u32>,
    pub stats: Vec<Stat>,
}

impl Pokemon {
    pub fn has_type(&self, ty: PokemonType) -> bool {
        self.types.contains(&ty)
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight as f64 / 10.0
    }

    pub fn height_m(&self) -> f64 {
        self.height as f64 / 10.0
    }
}

/// A named base stat, kept in API order (hp, attack, defense, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub base: u32,
}

/// Display language for the static label tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es" => Ok(Language::Es),
            "en" => Ok(Language::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// The closed set of 18 elemental types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    /// The lowercase key used by the remote API.
    pub fn key(self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }

    /// Display label from the static translation table.
    pub fn label(self, lang: Language) -> &'static str {
        if lang == Language::En {
            return match self {
                PokemonType::Normal => "Normal",
                PokemonType::Fire => "Fire",
                PokemonType::Water => "Water",
                PokemonType::Electric => "Electric",
                PokemonType::Grass => "Grass",
                PokemonType::Ice => "Ice",
                PokemonType::Fighting => "Fighting",
                PokemonType::Poison => "Poison",
                PokemonType::Ground => "Ground",
                PokemonType::Flying => "Flying",
                PokemonType::Psychic => "Psychic",
                PokemonType::Bug => "Bug",
                PokemonType::Rock => "Rock",
                PokemonType::Ghost => "Ghost",
                PokemonType::Dragon => "Dragon",
                PokemonType::Dark => "Dark",
                PokemonType::Steel => "Steel",
                PokemonType::Fairy => "Fairy",
            };
        }
        match self {
            PokemonType::Normal => "Normal",
            PokemonType::Fire => "Fuego",
            PokemonType::Water => "Agua",
            PokemonType::Electric => "Eléctrico",
            PokemonType::Grass => "Planta",
            PokemonType::Ice => "Hielo",
            PokemonType::Fighting => "Lucha",
            PokemonType::Poison => "Veneno",
            PokemonType::Ground => "Tierra",
            PokemonType::Flying => "Volador",
            PokemonType::Psychic => "Psíquico",
            PokemonType::Bug => "Bicho",
            PokemonType::Rock => "Roca",
            PokemonType::Ghost => "Fantasma",
            PokemonType::Dragon => "Dragón",
            PokemonType::Dark => "Siniestro",
            PokemonType::Steel => "Acero",
            PokemonType::Fairy => "Hada",
        }
    }
}

impl std::fmt::Display for PokemonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PokemonType {
    type Err = LookupError;

    /// Case-insensitive; accepts API keys only.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        PokemonType::ALL
            .into_iter()
            .find(|t| t.key() == key)
            .ok_or(LookupError::UnknownType(key))
    }
}

/// Positional stat label used in the detail view.
pub fn stat_label(index: usize, lang: Language) -> &'static str {
    const ES: [&str; 6] = ["PS", "Ataque", "Defensa", "At. Esp.", "Def. Esp.", "Velocidad"];
    const EN: [&str; 6] = ["HP", "Attack", "Defense", "Sp. Atk", "Sp. Def", "Speed"];
    let table = match lang {
        Language::Es => &ES,
        Language::En => &EN,
    };
    table.get(index).copied().unwrap_or("?")
}
