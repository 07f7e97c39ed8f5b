// Delivery options: priority, time to live, collapse key and related provider flags

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    FieldSpec, NotificationError, NotificationResult, bool_field, populate_builder,
    string_field, table_to_map, u32_field,
};

/// Longest time to live the provider accepts, in seconds (four weeks)
pub const MAX_TIME_TO_LIVE: u32 = 2_419_200;

/// Delivery priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionsPriority {
    #[default]
    Normal,
    High,
}

impl OptionsPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionsPriority::Normal => "normal",
            OptionsPriority::High => "high",
        }
    }
}

impl std::fmt::Display for OptionsPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionsPriority {
    type Err = NotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(OptionsPriority::Normal),
            "high" => Ok(OptionsPriority::High),
            other => Err(NotificationError::InvalidFieldValue {
                group: "options",
                field: "priority",
                expected: "\"normal\" or \"high\"",
                given: format!("\"{}\"", other),
            }),
        }
    }
}

/// Built delivery options
///
/// Deserializing goes through [`OptionsBuilder::from_map`], so the same field checks apply.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Options {
    #[serde(skip_serializing_if = "Option::is_none")]
    collapse_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<OptionsPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    delay_while_idle: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_to_live: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    restricted_package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dry_run: Option<bool>,
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    pub fn collapse_key(&self) -> Option<&str> {
        self.collapse_key.as_deref()
    }

    pub fn priority(&self) -> Option<OptionsPriority> {
        self.priority
    }

    pub fn is_content_available(&self) -> Option<bool> {
        self.content_available
    }

    pub fn is_delay_while_idle(&self) -> Option<bool> {
        self.delay_while_idle
    }

    pub fn time_to_live(&self) -> Option<u32> {
        self.time_to_live
    }

    pub fn restricted_package_name(&self) -> Option<&str> {
        self.restricted_package_name.as_deref()
    }

    pub fn is_dry_run(&self) -> Option<bool> {
        self.dry_run
    }

    /// Raw mapping of the fields that are set, keyed by provider field name
    pub fn to_map(&self) -> Map<String, Value> {
        table_to_map(OPTIONS_MAP, self)
    }

    /// Reopen as a builder carrying the current values
    pub fn to_builder(&self) -> OptionsBuilder {
        OptionsBuilder {
            collapse_key: self.collapse_key.clone(),
            priority: self.priority,
            content_available: self.content_available,
            delay_while_idle: self.delay_while_idle,
            time_to_live: self.time_to_live,
            restricted_package_name: self.restricted_package_name.clone(),
            dry_run: self.dry_run,
        }
    }
}

impl TryFrom<Map<String, Value>> for Options {
    type Error = NotificationError;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        OptionsBuilder::from_map(&raw).map(OptionsBuilder::build)
    }
}

/// Builder for [`Options`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionsBuilder {
    collapse_key: Option<String>,
    priority: Option<OptionsPriority>,
    content_available: Option<bool>,
    delay_while_idle: Option<bool>,
    time_to_live: Option<u32>,
    restricted_package_name: Option<String>,
    dry_run: Option<bool>,
}

impl OptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a raw mapping through the options name table
    pub fn from_map(raw: &Map<String, Value>) -> NotificationResult<Self> {
        let mut builder = Self::default();
        populate_builder(OPTIONS_MAP, &mut builder, raw)?;
        Ok(builder)
    }

    pub fn with_collapse_key(mut self, collapse_key: impl Into<String>) -> Self {
        self.collapse_key = Some(collapse_key.into());
        self
    }

    pub fn with_priority(mut self, priority: OptionsPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_content_available(mut self, content_available: bool) -> Self {
        self.content_available = Some(content_available);
        self
    }

    pub fn with_delay_while_idle(mut self, delay_while_idle: bool) -> Self {
        self.delay_while_idle = Some(delay_while_idle);
        self
    }

    /// Fails when `seconds` exceeds [`MAX_TIME_TO_LIVE`]
    pub fn with_time_to_live(mut self, seconds: u32) -> NotificationResult<Self> {
        self.time_to_live = Some(checked_time_to_live(seconds)?);
        Ok(self)
    }

    pub fn with_restricted_package_name(mut self, name: impl Into<String>) -> Self {
        self.restricted_package_name = Some(name.into());
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = Some(dry_run);
        self
    }

    pub(crate) fn has_priority(&self) -> bool {
        self.priority.is_some()
    }

    pub fn build(self) -> Options {
        Options {
            collapse_key: self.collapse_key,
            priority: self.priority,
            content_available: self.content_available,
            delay_while_idle: self.delay_while_idle,
            time_to_live: self.time_to_live,
            restricted_package_name: self.restricted_package_name,
            dry_run: self.dry_run,
        }
    }
}

fn checked_time_to_live(seconds: u32) -> NotificationResult<u32> {
    if seconds > MAX_TIME_TO_LIVE {
        return Err(NotificationError::InvalidFieldValue {
            group: "options",
            field: "time_to_live",
            expected: "seconds between 0 and 2419200",
            given: seconds.to_string(),
        });
    }
    Ok(seconds)
}

/// Raw key to typed field translation table for the options group
pub(crate) const OPTIONS_MAP: &[FieldSpec<Options, OptionsBuilder>] = &[
    FieldSpec {
        key: "dry_run",
        read: |o| o.dry_run.map(Value::from),
        write: |b, v| {
            b.dry_run = Some(bool_field("options", "dry_run", v)?);
            Ok(())
        },
    },
    FieldSpec {
        key: "priority",
        read: |o| o.priority.map(|p| Value::from(p.as_str())),
        write: |b, v| {
            let raw = string_field("options", "priority", v)?;
            b.priority = Some(raw.parse()?);
            Ok(())
        },
    },
    FieldSpec {
        key: "time_to_live",
        read: |o| o.time_to_live.map(Value::from),
        write: |b, v| {
            let seconds = u32_field("options", "time_to_live", v)?;
            b.time_to_live = Some(checked_time_to_live(seconds)?);
            Ok(())
        },
    },
    FieldSpec {
        key: "collapse_key",
        read: |o| o.collapse_key.clone().map(Value::from),
        write: |b, v| {
            b.collapse_key = Some(string_field("options", "collapse_key", v)?);
            Ok(())
        },
    },
    FieldSpec {
        key: "delay_while_idle",
        read: |o| o.delay_while_idle.map(Value::from),
        write: |b, v| {
            b.delay_while_idle = Some(bool_field("options", "delay_while_idle", v)?);
            Ok(())
        },
    },
    FieldSpec {
        key: "content_available",
        read: |o| o.content_available.map(Value::from),
        write: |b, v| {
            b.content_available = Some(bool_field("options", "content_available", v)?);
            Ok(())
        },
    },
    FieldSpec {
        key: "restricted_package_name",
        read: |o| o.restricted_package_name.clone().map(Value::from),
        write: |b, v| {
            b.restricted_package_name =
                Some(string_field("options", "restricted_package_name", v)?);
            Ok(())
        },
    },
];

/// Name-dispatched setters of the options group, mapped to raw keys
pub const OPTIONS_SETTERS: &[(&str, &str)] = &[
    ("set_dry_run", "dry_run"),
    ("set_priority", "priority"),
    ("set_time_to_live", "time_to_live"),
    ("set_collapse_key", "collapse_key"),
    ("set_delay_while_idle", "delay_while_idle"),
    ("set_content_available", "content_available"),
    ("set_restricted_package_name", "restricted_package_name"),
];

/// Name-dispatched getters of the options group, mapped to raw keys
pub const OPTIONS_GETTERS: &[(&str, &str)] = &[
    ("is_dry_run", "dry_run"),
    ("priority", "priority"),
    ("time_to_live", "time_to_live"),
    ("collapse_key", "collapse_key"),
    ("is_delay_while_idle", "delay_while_idle"),
    ("is_content_available", "content_available"),
    ("restricted_package_name", "restricted_package_name"),
];
