//! Persisted profile record
//!
//! The profile is the avatar selection plus a few free-text fields and the
//! theme colors. Loading is a field-by-field merge into defaults: every
//! field is checked on its own, bad fields are skipped and reported, and
//! nothing about a malformed record is fatal.

use crate::category::Category;
use crate::color::Theme;
use crate::selection::SpriteSelection;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::fmt;

/// Avatar selection plus profile text and colors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub selection: SpriteSelection,
    pub nick: String,
    pub about: String,
    pub pronouns: String,
    /// Accent hex color, empty when unset
    pub accent: String,
    /// Background hex color, empty when unset
    pub bg_color: String,
}

/// Wire shape of the record
#[derive(Serialize)]
struct ProfileRecord<'a> {
    skin: Option<u32>,
    hair: Option<u32>,
    hat: Option<u32>,
    expr: Option<u32>,
    shirt: Option<u32>,
    nick: &'a str,
    about: &'a str,
    pronouns: &'a str,
    accent: &'a str,
    #[serde(rename = "bgColor")]
    bg_color: &'a str,
}

/// Why a stored field was ignored
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Value has the wrong JSON type
    WrongType(&'static str),
    /// Numeric but not a whole number
    NotAnInteger(f64),
    /// Whole number outside the category's range
    OutOfRange(i64),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongType(found) => write!(f, "wrong type ({})", found),
            Self::NotAnInteger(v) => write!(f, "not an integer ({})", v),
            Self::OutOfRange(v) => write!(f, "out of range ({})", v),
        }
    }
}

/// A field that was present but not accepted
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRejection {
    pub field: &'static str,
    pub reason: RejectReason,
}

/// Outcome of merging a stored record into defaults
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Fields taken from the record
    pub accepted: Vec<&'static str>,
    /// Fields present but ignored
    pub rejected: Vec<FieldRejection>,
    /// Fields absent, or null/empty text
    pub missing: Vec<&'static str>,
    /// Set when the record as a whole could not be read
    pub unreadable: Option<String>,
}

impl LoadReport {
    /// Report for a record that could not be read at all
    pub fn unreadable(reason: impl Into<String>) -> Self {
        Self {
            unreadable: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Every present field was accepted
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.unreadable.is_none()
    }

    pub fn was_rejected(&self, field: &str) -> bool {
        self.rejected.iter().any(|r| r.field == field)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Whole-number value of a JSON number, accepting `3.0` as `3`
fn whole_number(n: &Number) -> Result<i64, f64> {
    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    let f = n.as_f64().unwrap_or(f64::NAN);
    if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Ok(f as i64)
    } else {
        Err(f)
    }
}

enum Field<'a> {
    Missing,
    Null,
    Present(&'a Value),
}

fn field<'a>(map: &'a Map<String, Value>, key: &str) -> Field<'a> {
    match map.get(key) {
        None => Field::Missing,
        Some(Value::Null) => Field::Null,
        Some(v) => Field::Present(v),
    }
}

impl Profile {
    /// Defaults: first frame of every category, empty text and colors
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the nickname, trimmed
    pub fn set_nick(&mut self, nick: &str) {
        self.nick = nick.trim().to_string();
    }

    /// Set the about text, trimmed
    pub fn set_about(&mut self, about: &str) {
        self.about = about.trim().to_string();
    }

    /// Theme colors for other pages
    pub fn theme(&self) -> Theme {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Theme::new(non_empty(&self.accent), non_empty(&self.bg_color))
    }

    /// Nickname for display, with a placeholder when empty
    pub fn display_nick(&self) -> &str {
        if self.nick.is_empty() { "Nickname" } else { self.nick.as_str() }
    }

    /// Serialize to the persisted JSON record
    pub fn to_record(&self) -> serde_json::Result<String> {
        let s = &self.selection;
        serde_json::to_string(&ProfileRecord {
            skin: s.skin,
            hair: s.hair,
            hat: s.hat,
            expr: s.expression,
            shirt: s.shirt,
            nick: &self.nick,
            about: &self.about,
            pronouns: &self.pronouns,
            accent: &self.accent,
            bg_color: &self.bg_color,
        })
    }

    /// Build a profile from a stored record, starting from defaults
    pub fn from_record(raw: &str) -> (Self, LoadReport) {
        let mut profile = Self::default();
        let report = profile.merge_record(raw);
        (profile, report)
    }

    /// Merge a stored record into this profile, field by field
    pub fn merge_record(&mut self, raw: &str) -> LoadReport {
        let value: Value = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => return LoadReport::unreadable(e.to_string()),
        };
        match value {
            Value::Object(map) => self.merge_map(&map),
            other => LoadReport::unreadable(format!("expected object, found {}", type_name(&other))),
        }
    }

    fn merge_map(&mut self, map: &Map<String, Value>) -> LoadReport {
        let mut report = LoadReport::default();

        for category in Category::ALL {
            let key = category.key();
            match field(map, key) {
                Field::Missing => report.missing.push(key),
                // an emptied slot is saved as null and stays empty
                Field::Null => {
                    self.selection.clear(category);
                    report.accepted.push(key);
                }
                Field::Present(Value::Number(n)) => match whole_number(n) {
                    Ok(i) => {
                        let in_range = u32::try_from(i)
                            .is_ok_and(|index| self.selection.set(category, index).is_ok());
                        if in_range {
                            report.accepted.push(key);
                        } else {
                            report.rejected.push(FieldRejection {
                                field: key,
                                reason: RejectReason::OutOfRange(i),
                            });
                        }
                    }
                    Err(f) => report.rejected.push(FieldRejection {
                        field: key,
                        reason: RejectReason::NotAnInteger(f),
                    }),
                },
                Field::Present(other) => report.rejected.push(FieldRejection {
                    field: key,
                    reason: RejectReason::WrongType(type_name(other)),
                }),
            }
        }

        let texts: [(&'static str, &mut String, bool); 5] = [
            ("nick", &mut self.nick, false),
            ("about", &mut self.about, false),
            ("pronouns", &mut self.pronouns, false),
            ("accent", &mut self.accent, true),
            ("bgColor", &mut self.bg_color, true),
        ];

        for (key, slot, require_non_empty) in texts {
            match field(map, key) {
                Field::Missing | Field::Null => report.missing.push(key),
                Field::Present(Value::String(s)) if require_non_empty && s.is_empty() => {
                    report.missing.push(key)
                }
                Field::Present(Value::String(s)) => {
                    *slot = s.clone();
                    report.accepted.push(key);
                }
                Field::Present(other) => report.rejected.push(FieldRejection {
                    field: key,
                    reason: RejectReason::WrongType(type_name(other)),
                }),
            }
        }

        report
    }
}
