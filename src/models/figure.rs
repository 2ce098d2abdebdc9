//! Figures attached to the research highlight.
//!
//! Each live figure owns exactly one `[FIG-n]` token in the narrative, `n`
//! being its dense 1-based local index.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"( ?)\[FIG-(\d+)\]").expect("placeholder pattern"));

pub fn placeholder(local_index: usize) -> String {
    format!("[FIG-{local_index}]")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Figure {
    pub id: String,
    #[serde(default)]
    pub local_index: usize,
    pub caption: String,
    #[serde(rename = "base64", with = "base64_bytes")]
    pub data: Vec<u8>,
    #[serde(default)]
    pub file_name: String,
    #[serde(default = "default_mime")]
    pub mime_type: String,
}

fn default_mime() -> String {
    DEFAULT_MIME_TYPE.to_string()
}

/// Image bytes travel as standard base64 text.
pub(crate) mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(d)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// Token consistency between the narrative and the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceholderCheck {
    /// Live figures whose token is absent from the text.
    pub missing: Vec<usize>,
    /// Tokens that point to no live figure.
    pub unknown: Vec<usize>,
    /// Tokens that appear more than once.
    pub duplicated: Vec<usize>,
}

impl PlaceholderCheck {
    pub fn is_consistent(&self) -> bool {
        self.missing.is_empty() && self.unknown.is_empty() && self.duplicated.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigureRegistry {
    figures: Vec<Figure>,
    counter: usize,
}

impl FigureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }

    /// Last local index handed out.
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Register a figure and return the token that refers to it.
    pub fn add(
        &mut self,
        data: Vec<u8>,
        mime_type: &str,
        file_name: &str,
        caption: &str,
    ) -> AppResult<String> {
        if data.is_empty() {
            return Err(AppError::Validation("Please select an image.".into()));
        }
        let caption = caption.trim();
        if caption.is_empty() {
            return Err(AppError::Validation("Please enter a caption.".into()));
        }

        self.counter += 1;
        let local_index = self.counter;
        let id = self.fresh_id(local_index);
        let mime_type = if mime_type.trim().is_empty() {
            DEFAULT_MIME_TYPE
        } else {
            mime_type.trim()
        };

        self.figures.push(Figure {
            id,
            local_index,
            caption: caption.to_string(),
            data,
            file_name: file_name.to_string(),
            mime_type: mime_type.to_string(),
        });

        Ok(placeholder(local_index))
    }

    fn fresh_id(&self, local_index: usize) -> String {
        let base = format!("fig_{}_{local_index}", Utc::now().timestamp_millis());
        let mut id = base.clone();
        let mut n = 1;
        while self.figures.iter().any(|f| f.id == id) {
            n += 1;
            id = format!("{base}_{n}");
        }
        id
    }

    /// Look a figure up by id, by local index (`2`) or by token (`FIG-2`,
    /// `[FIG-2]`).
    pub fn find(&self, key: &str) -> Option<&Figure> {
        let key = key.trim();
        if let Some(f) = self.figures.iter().find(|f| f.id == key) {
            return Some(f);
        }
        let n: usize = key
            .trim_start_matches('[')
            .trim_end_matches(']')
            .trim_start_matches("FIG-")
            .parse()
            .ok()?;
        self.figures.iter().find(|f| f.local_index == n)
    }

    /// Remove the figure `id`, renumber the survivors 1..N-1 and rewrite the
    /// tokens of `narrative` in a single pass.
    pub fn delete(&mut self, id: &str, narrative: &mut String) -> AppResult<Figure> {
        let pos = self
            .figures
            .iter()
            .position(|f| f.id == id)
            .ok_or_else(|| AppError::FigureNotFound(id.to_string()))?;
        let removed = self.figures.remove(pos);

        let remap: HashMap<usize, usize> = self
            .figures
            .iter()
            .enumerate()
            .map(|(i, f)| (f.local_index, i + 1))
            .collect();
        for (i, f) in self.figures.iter_mut().enumerate() {
            f.local_index = i + 1;
        }
        self.counter = self.figures.len();

        let rewritten = PLACEHOLDER.replace_all(narrative.as_str(), |caps: &Captures<'_>| {
            let old: Option<usize> = caps[2].parse().ok();
            match old {
                Some(n) if n == removed.local_index => String::new(),
                Some(n) => match remap.get(&n) {
                    Some(new) => format!("{}{}", &caps[1], placeholder(*new)),
                    None => caps[0].to_string(),
                },
                None => caps[0].to_string(),
            }
        });
        *narrative = rewritten.into_owned();

        Ok(removed)
    }

    /// Replace the registry with stored figures. The counter resumes from the
    /// highest stored local index so gaps never produce a reused token.
    pub fn restore(&mut self, figures: Vec<Figure>) {
        self.counter = figures.iter().map(|f| f.local_index).max().unwrap_or(0);
        self.figures = figures;
    }

    pub fn clear(&mut self) {
        self.figures.clear();
        self.counter = 0;
    }

    pub fn placeholder_check(&self, narrative: &str) -> PlaceholderCheck {
        let mut seen: BTreeMap<usize, usize> = BTreeMap::new();
        for caps in PLACEHOLDER.captures_iter(narrative) {
            if let Ok(n) = caps[2].parse::<usize>() {
                *seen.entry(n).or_default() += 1;
            }
        }
        let live: BTreeSet<usize> = self.figures.iter().map(|f| f.local_index).collect();

        PlaceholderCheck {
            missing: live.iter().filter(|n| !seen.contains_key(*n)).copied().collect(),
            unknown: seen.keys().filter(|n| !live.contains(*n)).copied().collect(),
            duplicated: seen
                .iter()
                .filter(|(_, count)| **count > 1)
                .map(|(n, _)| *n)
                .collect(),
        }
    }
}
