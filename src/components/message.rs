// Outgoing message: recipient plus the three provider sub-objects
// Field groups accept built values, builders or raw mappings; raw mappings merge over what is already set

use serde_json::{Map, Value};

use super::options::{OPTIONS_GETTERS, OPTIONS_SETTERS};
use super::payload::{NOTIFICATION_GETTERS, NOTIFICATION_SETTERS};
use super::{
    FieldGroup, NotificationError, NotificationResult, Options, OptionsBuilder, OptionsPriority,
    PayloadData, PayloadDataBuilder, PayloadNotification, PayloadNotificationBuilder, Recipient,
    json_type_name,
};

pub type OptionsInput = FieldGroup<Options, OptionsBuilder>;
pub type NotificationInput = FieldGroup<PayloadNotification, PayloadNotificationBuilder>;
pub type DataInput = FieldGroup<PayloadData, PayloadDataBuilder>;

macro_rules! field_group_inputs {
    ($($built:ty, $builder:ty);+ $(;)?) => {
        $(
            impl From<$built> for FieldGroup<$built, $builder> {
                fn from(value: $built) -> Self {
                    FieldGroup::Built(value)
                }
            }

            impl From<$builder> for FieldGroup<$built, $builder> {
                fn from(value: $builder) -> Self {
                    FieldGroup::Builder(value)
                }
            }
        )+
    };
}

field_group_inputs! {
    Options, OptionsBuilder;
    PayloadNotification, PayloadNotificationBuilder;
    PayloadData, PayloadDataBuilder;
}

/// Which provider call a message goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MessageKind {
    /// Registration token(s)
    #[default]
    Direct,
    /// Topic expression; the recipient must be [`Recipient::Topics`]
    Topic,
    /// Device-group notification key
    Group,
}

impl MessageKind {
    /// Whether a recipient has the shape this kind addresses
    pub fn accepts(&self, recipient: &Recipient) -> bool {
        match self {
            MessageKind::Topic => matches!(recipient, Recipient::Topics(_)),
            MessageKind::Direct | MessageKind::Group => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            MessageKind::Direct => "direct",
            MessageKind::Topic => "topic",
            MessageKind::Group => "group",
        }
    }
}

/// Arguments of one provider call, in call order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageArgs {
    pub recipient: Option<Recipient>,
    pub options: Option<Options>,
    pub notification: Option<PayloadNotification>,
    pub data: Option<PayloadData>,
}

/// Message handed to the channel by a notification
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FcmMessage {
    kind: MessageKind,
    recipient: Option<Recipient>,
    options: Option<Options>,
    notification: Option<PayloadNotification>,
    data: Option<PayloadData>,
}

macro_rules! options_flag_accessors {
    ($($setter:ident, $getter:ident => $with:ident);+ $(;)?) => {
        $(
            pub fn $setter(&mut self, value: bool) -> &mut Self {
                let builder = self.options_builder().$with(value);
                self.options = Some(builder.build());
                self
            }

            pub fn $getter(&self) -> Option<bool> {
                self.options.as_ref().and_then(Options::$getter)
            }
        )+
    };
}

macro_rules! notification_accessors {
    ($($setter:ident, $getter:ident => $with:ident, $field:ident);+ $(;)?) => {
        $(
            pub fn $setter(&mut self, value: impl Into<String>) -> &mut Self {
                let builder = self.notification_builder().$with(value);
                self.notification = Some(builder.build());
                self
            }

            pub fn $getter(&self) -> Option<&str> {
                self.notification.as_ref().and_then(PayloadNotification::$field)
            }
        )+
    };
}

impl FcmMessage {
    /// Direct message (token or token list)
    pub fn new() -> Self {
        Self::default()
    }

    /// Topic-addressed message
    pub fn topic() -> Self {
        Self::of_kind(MessageKind::Topic)
    }

    /// Device-group message
    pub fn group() -> Self {
        Self::of_kind(MessageKind::Group)
    }

    pub fn of_kind(kind: MessageKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Build a message, routing each argument through its field-group setter
    pub fn create(
        kind: MessageKind,
        options: impl Into<OptionsInput>,
        notification: impl Into<NotificationInput>,
        data: impl Into<DataInput>,
    ) -> NotificationResult<Self> {
        let mut message = Self::of_kind(kind);
        message
            .set_options(options)?
            .set_notification(notification)?
            .set_data(data)?;
        Ok(message)
    }

    pub fn kind(&self) -> MessageKind {
        self.kind
    }

    /// Set the recipient; topic messages only accept [`Recipient::Topics`]
    pub fn to(&mut self, recipient: impl Into<Recipient>) -> NotificationResult<&mut Self> {
        let recipient = recipient.into();
        if !self.kind.accepts(&recipient) {
            return Err(NotificationError::invalid_argument(
                "to",
                "instanceof Topics",
                recipient.type_name(),
            ));
        }
        self.recipient = Some(recipient);
        Ok(self)
    }

    pub fn recipient(&self) -> Option<&Recipient> {
        self.recipient.as_ref()
    }

    /// True when no recipient is set, or the one set addresses nobody
    pub fn recipient_not_given(&self) -> bool {
        self.recipient.as_ref().is_none_or(Recipient::is_empty)
    }

    pub fn options(&self) -> Option<&Options> {
        self.options.as_ref()
    }

    pub fn notification(&self) -> Option<&PayloadNotification> {
        self.notification.as_ref()
    }

    pub fn data(&self) -> Option<&PayloadData> {
        self.data.as_ref()
    }

    /// Set or merge the options group
    ///
    /// Raw mappings are merged over the current options; when the result names no
    /// `priority`, `normal` is used.
    pub fn set_options(&mut self, input: impl Into<OptionsInput>) -> NotificationResult<&mut Self> {
        match input.into() {
            FieldGroup::Empty => {},
            FieldGroup::Built(options) => self.options = Some(options),
            FieldGroup::Builder(builder) => self.options = Some(builder.build()),
            FieldGroup::Raw(raw) => {
                let mut merged = self.options.as_ref().map(Options::to_map).unwrap_or_default();
                merged.extend(raw);
                if !merged.contains_key("priority") {
                    merged.insert(
                        "priority".to_string(),
                        Value::from(OptionsPriority::Normal.as_str()),
                    );
                }
                self.options = Some(OptionsBuilder::from_map(&merged)?.build());
            },
            FieldGroup::Unsupported(value) => {
                return Err(NotificationError::invalid_argument(
                    "set_options",
                    "instanceof Options, OptionsBuilder, null or map",
                    json_type_name(&value),
                ));
            },
        }
        Ok(self)
    }

    /// Set or merge the notification group
    pub fn set_notification(
        &mut self,
        input: impl Into<NotificationInput>,
    ) -> NotificationResult<&mut Self> {
        match input.into() {
            FieldGroup::Empty => {},
            FieldGroup::Built(notification) => self.notification = Some(notification),
            FieldGroup::Builder(builder) => self.notification = Some(builder.build()),
            FieldGroup::Raw(raw) => {
                let mut merged = self
                    .notification
                    .as_ref()
                    .map(PayloadNotification::to_map)
                    .unwrap_or_default();
                merged.extend(raw);
                self.notification = Some(PayloadNotificationBuilder::from_map(&merged)?.build());
            },
            FieldGroup::Unsupported(value) => {
                return Err(NotificationError::invalid_argument(
                    "set_notification",
                    "instanceof PayloadNotification, PayloadNotificationBuilder, null or map",
                    json_type_name(&value),
                ));
            },
        }
        Ok(self)
    }

    /// Set or merge the data group
    pub fn set_data(&mut self, input: impl Into<DataInput>) -> NotificationResult<&mut Self> {
        match input.into() {
            FieldGroup::Empty => {},
            FieldGroup::Built(data) => self.data = Some(data),
            FieldGroup::Builder(builder) => self.data = Some(builder.build()),
            FieldGroup::Raw(raw) => {
                let mut merged = self.data.as_ref().map(PayloadData::to_map).unwrap_or_default();
                merged.extend(raw);
                self.data = Some(PayloadDataBuilder::new().set_data(merged).build());
            },
            FieldGroup::Unsupported(value) => {
                return Err(NotificationError::invalid_argument(
                    "set_data",
                    "instanceof PayloadData, PayloadDataBuilder, null or map",
                    json_type_name(&value),
                ));
            },
        }
        Ok(self)
    }

    /// Set one field by accessor name, e.g. `set_by_name("set_title", "Hello")`
    pub fn set_by_name(
        &mut self,
        method: &str,
        value: impl Into<Value>,
    ) -> NotificationResult<&mut Self> {
        if let Some(key) = lookup(OPTIONS_SETTERS, method) {
            return self.set_options(single_field(key, value.into()));
        }
        if let Some(key) = lookup(NOTIFICATION_SETTERS, method) {
            return self.set_notification(single_field(key, value.into()));
        }
        Err(NotificationError::no_such_method(method))
    }

    /// Read one field by accessor name, e.g. `get_by_name("title")`
    pub fn get_by_name(&self, method: &str) -> NotificationResult<Option<Value>> {
        if let Some(key) = lookup(OPTIONS_GETTERS, method) {
            return Ok(self.options.as_ref().and_then(|o| o.to_map().remove(key)));
        }
        if let Some(key) = lookup(NOTIFICATION_GETTERS, method) {
            return Ok(self.notification.as_ref().and_then(|n| n.to_map().remove(key)));
        }
        Err(NotificationError::no_such_method(method))
    }

    pub fn set_priority(&mut self, priority: OptionsPriority) -> &mut Self {
        let builder = self.options_builder().with_priority(priority);
        self.options = Some(builder.build());
        self
    }

    pub fn priority(&self) -> Option<OptionsPriority> {
        self.options.as_ref().and_then(Options::priority)
    }

    pub fn set_time_to_live(&mut self, seconds: u32) -> NotificationResult<&mut Self> {
        let builder = self.options_builder().with_time_to_live(seconds)?;
        self.options = Some(builder.build());
        Ok(self)
    }

    pub fn time_to_live(&self) -> Option<u32> {
        self.options.as_ref().and_then(Options::time_to_live)
    }

    pub fn set_collapse_key(&mut self, collapse_key: impl Into<String>) -> &mut Self {
        let builder = self.options_builder().with_collapse_key(collapse_key);
        self.options = Some(builder.build());
        self
    }

    pub fn collapse_key(&self) -> Option<&str> {
        self.options.as_ref().and_then(Options::collapse_key)
    }

    pub fn set_restricted_package_name(&mut self, name: impl Into<String>) -> &mut Self {
        let builder = self.options_builder().with_restricted_package_name(name);
        self.options = Some(builder.build());
        self
    }

    pub fn restricted_package_name(&self) -> Option<&str> {
        self.options.as_ref().and_then(Options::restricted_package_name)
    }

    options_flag_accessors! {
        set_dry_run, is_dry_run => with_dry_run;
        set_delay_while_idle, is_delay_while_idle => with_delay_while_idle;
        set_content_available, is_content_available => with_content_available;
    }

    notification_accessors! {
        set_tag, tag => with_tag, tag;
        set_body, body => with_body, body;
        set_icon, icon => with_icon, icon;
        set_title, title => with_title, title;
        set_sound, sound => with_sound, sound;
        set_badge, badge => with_badge, badge;
        set_color, color => with_color, color;
        set_click_action, click_action => with_click_action, click_action;
        set_body_location_key, body_location_key => with_body_location_key, body_loc_key;
        set_body_location_args, body_location_args => with_body_location_args, body_loc_args;
        set_title_location_key, title_location_key => with_title_location_key, title_loc_key;
        set_title_location_args, title_location_args => with_title_location_args, title_loc_args;
    }

    /// Arguments for the provider call, in call order
    pub fn args(&self) -> MessageArgs {
        self.clone().into_args()
    }

    pub fn into_args(self) -> MessageArgs {
        MessageArgs {
            recipient: self.recipient,
            options: self.options,
            notification: self.notification,
            data: self.data,
        }
    }

    /// Current options reopened for a single-field merge, with the default priority filled in
    fn options_builder(&self) -> OptionsBuilder {
        let builder = self.options.as_ref().map(Options::to_builder).unwrap_or_default();
        if builder.has_priority() {
            builder
        } else {
            builder.with_priority(OptionsPriority::Normal)
        }
    }

    fn notification_builder(&self) -> PayloadNotificationBuilder {
        self.notification
            .as_ref()
            .map(PayloadNotification::to_builder)
            .unwrap_or_default()
    }
}

fn lookup(table: &[(&str, &'static str)], method: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(name, _)| *name == method)
        .map(|(_, key)| *key)
}

fn single_field(key: &str, value: Value) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    map
}
