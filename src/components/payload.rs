// User-visible notification payload and arbitrary data payload

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    FieldSpec, NotificationError, NotificationResult, populate_builder, string_field,
    table_to_map,
};

macro_rules! notification_fields {
    ($( $(#[$doc:meta])* $field:ident => $with:ident ),+ $(,)?) => {
        /// Built notification payload (what the device displays)
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(try_from = "Map<String, Value>")]
        pub struct PayloadNotification {
            $(
                #[serde(skip_serializing_if = "Option::is_none")]
                $field: Option<String>,
            )+
        }

        impl PayloadNotification {
            $(
                $(#[$doc])*
                pub fn $field(&self) -> Option<&str> {
                    self.$field.as_deref()
                }
            )+

            /// Reopen as a builder carrying the current values
            pub fn to_builder(&self) -> PayloadNotificationBuilder {
                PayloadNotificationBuilder {
                    $( $field: self.$field.clone(), )+
                }
            }
        }

        /// Builder for [`PayloadNotification`]
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct PayloadNotificationBuilder {
            $( $field: Option<String>, )+
        }

        impl PayloadNotificationBuilder {
            $(
                pub fn $with(mut self, value: impl Into<String>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )+

            pub fn build(self) -> PayloadNotification {
                PayloadNotification {
                    $( $field: self.$field, )+
                }
            }
        }

        /// Raw key to typed field translation table for the notification group
        pub(crate) const NOTIFICATION_MAP: &[FieldSpec<PayloadNotification, PayloadNotificationBuilder>] = &[
            $(
                FieldSpec {
                    key: stringify!($field),
                    read: |n| n.$field.clone().map(Value::from),
                    write: |b, v| {
                        b.$field = Some(string_field("notification", stringify!($field), v)?);
                        Ok(())
                    },
                },
            )+
        ];
    };
}

notification_fields! {
    tag => with_tag,
    body => with_body,
    icon => with_icon,
    title => with_title,
    sound => with_sound,
    badge => with_badge,
    color => with_color,
    click_action => with_click_action,
    /// Localization key of the body string
    body_loc_key => with_body_location_key,
    /// Localization arguments of the body string
    body_loc_args => with_body_location_args,
    /// Localization key of the title string
    title_loc_key => with_title_location_key,
    /// Localization arguments of the title string
    title_loc_args => with_title_location_args,
}

impl PayloadNotification {
    pub fn builder() -> PayloadNotificationBuilder {
        PayloadNotificationBuilder::default()
    }

    /// Raw mapping of the fields that are set, keyed by provider field name
    pub fn to_map(&self) -> Map<String, Value> {
        table_to_map(NOTIFICATION_MAP, self)
    }
}

impl TryFrom<Map<String, Value>> for PayloadNotification {
    type Error = NotificationError;

    fn try_from(raw: Map<String, Value>) -> Result<Self, Self::Error> {
        PayloadNotificationBuilder::from_map(&raw).map(PayloadNotificationBuilder::build)
    }
}

impl PayloadNotificationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate a raw mapping through the notification name table
    pub fn from_map(raw: &Map<String, Value>) -> NotificationResult<Self> {
        let mut builder = Self::default();
        populate_builder(NOTIFICATION_MAP, &mut builder, raw)?;
        Ok(builder)
    }
}

/// Name-dispatched setters of the notification group, mapped to raw keys
pub const NOTIFICATION_SETTERS: &[(&str, &str)] = &[
    ("set_tag", "tag"),
    ("set_body", "body"),
    ("set_icon", "icon"),
    ("set_title", "title"),
    ("set_sound", "sound"),
    ("set_badge", "badge"),
    ("set_color", "color"),
    ("set_click_action", "click_action"),
    ("set_body_location_key", "body_loc_key"),
    ("set_body_location_args", "body_loc_args"),
    ("set_title_location_key", "title_loc_key"),
    ("set_title_location_args", "title_loc_args"),
];

/// Name-dispatched getters of the notification group, mapped to raw keys
pub const NOTIFICATION_GETTERS: &[(&str, &str)] = &[
    ("tag", "tag"),
    ("body", "body"),
    ("icon", "icon"),
    ("title", "title"),
    ("sound", "sound"),
    ("badge", "badge"),
    ("color", "color"),
    ("click_action", "click_action"),
    ("body_location_key", "body_loc_key"),
    ("body_location_args", "body_loc_args"),
    ("title_location_key", "title_loc_key"),
    ("title_location_args", "title_loc_args"),
];

/// Built data payload, delivered to the application rather than displayed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayloadData {
    data: Map<String, Value>,
}

impl PayloadData {
    pub fn builder() -> PayloadDataBuilder {
        PayloadDataBuilder::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.data.clone()
    }
}

/// Builder for [`PayloadData`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadDataBuilder {
    data: Map<String, Value>,
}

impl PayloadDataBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge entries over the current ones
    pub fn add_data(mut self, data: Map<String, Value>) -> Self {
        self.data.extend(data);
        self
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Replace every entry
    pub fn set_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    pub fn remove_all_data(mut self) -> Self {
        self.data.clear();
        self
    }

    pub fn build(self) -> PayloadData {
        PayloadData { data: self.data }
    }
}
