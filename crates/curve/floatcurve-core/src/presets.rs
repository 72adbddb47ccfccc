//! Named curve presets.
//!
//! Built-in presets ship with the crate and cannot be overwritten or deleted.
//! User presets are held in memory; persisting them is left to the caller,
//! which gets each preset's text body from [`Preset::to_key_lines`].

use indexmap::IndexMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::NumberStyle;
use crate::constants::DEFAULT_KEY_NAME;
use crate::error::CurveError;
use crate::keyframe::Keyframe;
use crate::text_format::{format_lines, parse_preset_lines};
use crate::Result;

/// Characters not allowed in a preset name (they end up in file names).
const INVALID_NAME_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub points: Vec<Keyframe>,
}

impl Preset {
    pub fn new(name: impl Into<String>, description: impl Into<String>, points: Vec<Keyframe>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
        }
    }

    /// Preset file body: display-formatted key lines.
    pub fn to_key_lines(&self) -> String {
        format_lines(&self.points, DEFAULT_KEY_NAME, NumberStyle::Display)
    }

    /// Rebuild a preset from a file body. Only lines starting with `key` count;
    /// malformed key lines are logged and dropped.
    pub fn from_key_lines(name: impl Into<String>, text: &str) -> Self {
        let name = name.into();
        let parsed = parse_preset_lines(text);
        for err in &parsed.rejected {
            warn!("floatcurve: preset '{name}': {err}");
        }
        Self {
            name,
            description: String::new(),
            points: parsed.keys,
        }
    }
}

fn builtin(name: &str, description: &str, points: &[(f32, f32, f32, f32)]) -> Preset {
    let points = points
        .iter()
        .filter_map(|&(t, v, i, o)| Keyframe::new(t, v, i, o).ok())
        .collect();
    Preset::new(name, description, points)
}

/// The curve an empty editor starts with.
pub fn default_preset() -> Preset {
    builtin(
        "Default",
        "Default curve on startup",
        &[(0.0, 0.0, 0.0, 0.02), (100.0, 1.0, 0.02, 0.0)],
    )
}

/// All built-in presets, default first.
pub fn builtin_presets() -> Vec<Preset> {
    vec![
        default_preset(),
        builtin(
            "Linear",
            "Constant rate of change",
            &[(0.0, 0.0, 0.0, 0.01), (100.0, 1.0, 0.01, 0.0)],
        ),
        builtin(
            "Ease In",
            "Starts slow, speeds up",
            &[(0.0, 0.0, 0.0, 0.0), (100.0, 1.0, 0.005, 0.0)],
        ),
        builtin(
            "Ease Out",
            "Starts fast, slows down",
            &[(0.0, 0.0, 0.0, 0.005), (100.0, 1.0, 0.0, 0.0)],
        ),
        builtin(
            "Smooth Start",
            "Very gradual acceleration",
            &[
                (0.0, 0.0, 0.0, 0.0),
                (50.0, 0.1, 0.002, 0.002),
                (100.0, 1.0, 0.02, 0.0),
            ],
        ),
    ]
}

/// Replace characters that cannot appear in a file name with `_` and trim.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if INVALID_NAME_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Built-in plus user presets, in insertion order (built-ins first).
#[derive(Clone, Debug)]
pub struct PresetLibrary {
    presets: IndexMap<String, Preset>,
    builtin_count: usize,
}

impl Default for PresetLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl PresetLibrary {
    pub fn new() -> Self {
        let presets: IndexMap<String, Preset> = builtin_presets()
            .into_iter()
            .map(|p| (p.name.clone(), p))
            .collect();
        let builtin_count = presets.len();
        Self {
            presets,
            builtin_count,
        }
    }

    /// Library seeded with user presets (e.g. read from disk by the caller).
    /// User presets that collide with a built-in name are skipped.
    pub fn with_user_presets<I>(presets: I) -> Self
    where
        I: IntoIterator<Item = Preset>,
    {
        let mut lib = Self::new();
        for preset in presets {
            if lib.is_builtin(&preset.name) {
                warn!(
                    "floatcurve: user preset '{}' shadows a built-in, skipped",
                    preset.name
                );
                continue;
            }
            lib.presets.insert(preset.name.clone(), preset);
        }
        lib
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.presets
            .get_index_of(name)
            .is_some_and(|i| i < self.builtin_count)
    }

    pub fn get(&self, name: &str) -> Option<&Preset> {
        self.presets.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    pub fn presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values()
    }

    pub fn user_presets(&self) -> impl Iterator<Item = &Preset> {
        self.presets.values().skip(self.builtin_count)
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Store a user preset under the sanitized `name`, replacing any user
    /// preset of that name. Returns the stored preset.
    pub fn save(
        &mut self,
        name: &str,
        description: &str,
        points: Vec<Keyframe>,
    ) -> Result<&Preset> {
        let name = sanitize_name(name);
        if name.is_empty() {
            return Err(CurveError::Preset {
                name,
                reason: "enter a valid preset name".into(),
            });
        }
        if self.is_builtin(&name) {
            return Err(CurveError::Preset {
                name,
                reason: "cannot overwrite a built-in preset".into(),
            });
        }
        debug!("floatcurve: saving preset '{name}' ({} points)", points.len());
        let preset = Preset::new(name.clone(), description, points);
        let (index, _) = self.presets.insert_full(name, preset);
        Ok(&self.presets[index])
    }

    /// Remove a user preset and return it.
    pub fn delete(&mut self, name: &str) -> Result<Preset> {
        if self.is_builtin(name) {
            return Err(CurveError::Preset {
                name: name.to_string(),
                reason: "cannot delete a built-in preset".into(),
            });
        }
        let removed = self
            .presets
            .shift_remove(name)
            .ok_or_else(|| CurveError::Preset {
                name: name.to_string(),
                reason: "no such preset".into(),
            })?;
        debug!("floatcurve: deleted preset '{name}'");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtins_are_in_order() {
        let names: Vec<String> = builtin_presets().into_iter().map(|p| p.name).collect();
        assert_eq!(
            names,
            vec!["Default", "Linear", "Ease In", "Ease Out", "Smooth Start"]
        );
        assert_eq!(default_preset().points.len(), 2);
    }

    #[test]
    fn builtins_are_protected() {
        let mut lib = PresetLibrary::new();
        assert!(matches!(
            lib.save("Linear", "", vec![]),
            Err(CurveError::Preset { .. })
        ));
        assert!(lib.delete("Default").is_err());
        assert!(lib.delete("missing").is_err());
        assert_eq!(lib.len(), 5);
    }

    #[test]
    fn save_sanitizes_and_replaces() {
        let mut lib = PresetLibrary::new();
        let saved = lib
            .save(" my/curve? ", "first", vec![Keyframe::flat(0.0, 0.0).unwrap()])
            .unwrap();
        assert_eq!(saved.name, "my_curve_");
        lib.save("my/curve?", "second", vec![]).unwrap();
        assert_eq!(lib.user_presets().count(), 1);
        assert_eq!(lib.get("my_curve_").unwrap().description, "second");
        assert!(lib.save("  ", "", vec![]).is_err());

        let removed = lib.delete("my_curve_").unwrap();
        assert_eq!(removed.description, "second");
        assert_eq!(lib.len(), 5);
    }

    #[test]
    fn user_presets_cannot_shadow_builtins() {
        let lib = PresetLibrary::with_user_presets([
            Preset::new("Linear", "fake", vec![]),
            Preset::new("Mine", "", vec![]),
        ]);
        assert_eq!(lib.get("Linear").unwrap().description, "Constant rate of change");
        assert!(!lib.is_builtin("Mine"));
        assert_eq!(lib.names().last(), Some("Mine"));
    }

    #[test]
    fn key_lines_round_trip() {
        let preset = builtin_presets().pop().unwrap();
        let body = preset.to_key_lines();
        assert_eq!(
            body,
            "key = 0 0 0 0\nkey = 50 0.1 0.002 0.002\nkey = 100 1 0.02 0"
        );
        let back = Preset::from_key_lines("Smooth Start", &body);
        assert_eq!(back.points, preset.points);
    }
}
