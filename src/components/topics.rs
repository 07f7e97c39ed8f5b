// Topic expressions: a single topic or a boolean condition over several topics

use std::sync::LazyLock;

use regex::Regex;

use super::{NotificationError, NotificationResult};

/// Alphabet the provider accepts for topic names
static TOPIC_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9_.~%-]+$").expect("topic name pattern must compile")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    And,
    Or,
}

impl Operator {
    fn as_str(&self) -> &'static str {
        match self {
            Operator::And => " && ",
            Operator::Or => " || ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Operand {
    Topic(String),
    Group(Topics),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Condition {
    operator: Option<Operator>,
    operand: Operand,
}

/// Rendered topic addressing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicTarget {
    /// Single topic, sent as `to: /topics/<name>`
    To(String),
    /// Boolean expression, sent as `condition`
    Condition(String),
}

/// Topic expression builder
///
/// ```
/// use fcm_notification_channel::{TopicTarget, Topics};
///
/// let topics = Topics::new()
///     .topic("news")
///     .and_topics(|t| t.topic("sports").or_topic("weather"));
///
/// assert_eq!(
///     topics.build().unwrap(),
///     TopicTarget::Condition("'news' in topics && ('sports' in topics || 'weather' in topics)".into())
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topics {
    conditions: Vec<Condition>,
}

impl Topics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expression made of one topic
    pub fn single(name: impl Into<String>) -> Self {
        Self::new().topic(name)
    }

    /// First topic of the expression; on a non-empty expression this behaves as [`Topics::and_topic`]
    pub fn topic(self, name: impl Into<String>) -> Self {
        self.push(Operator::And, Operand::Topic(name.into()))
    }

    pub fn and_topic(self, name: impl Into<String>) -> Self {
        self.push(Operator::And, Operand::Topic(name.into()))
    }

    pub fn or_topic(self, name: impl Into<String>) -> Self {
        self.push(Operator::Or, Operand::Topic(name.into()))
    }

    /// Parenthesized sub-expression joined with `&&`; empty groups are dropped
    pub fn and_topics(self, nest: impl FnOnce(Topics) -> Topics) -> Self {
        self.nest(Operator::And, nest)
    }

    /// Parenthesized sub-expression joined with `||`; empty groups are dropped
    pub fn or_topics(self, nest: impl FnOnce(Topics) -> Topics) -> Self {
        self.nest(Operator::Or, nest)
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn has_only_one_topic(&self) -> bool {
        matches!(
            self.conditions.as_slice(),
            [Condition { operand: Operand::Topic(_), .. }]
        )
    }

    /// Render to the provider's addressing form
    pub fn build(&self) -> NotificationResult<TopicTarget> {
        match self.conditions.as_slice() {
            [] => Err(NotificationError::NoTopicProvided),
            [Condition { operand: Operand::Topic(name), .. }] => {
                validate_name(name)?;
                Ok(TopicTarget::To(format!("/topics/{}", name)))
            },
            [Condition { operand: Operand::Group(inner), .. }] => inner.build(),
            conditions => Ok(TopicTarget::Condition(render(conditions)?)),
        }
    }

    fn push(mut self, operator: Operator, operand: Operand) -> Self {
        let operator = (!self.conditions.is_empty()).then_some(operator);
        self.conditions.push(Condition { operator, operand });
        self
    }

    fn nest(self, operator: Operator, nest: impl FnOnce(Topics) -> Topics) -> Self {
        let inner = nest(Topics::new());
        if inner.is_empty() {
            return self;
        }
        self.push(operator, Operand::Group(inner))
    }
}

fn validate_name(name: &str) -> NotificationResult<()> {
    if TOPIC_NAME.is_match(name) {
        Ok(())
    } else {
        Err(NotificationError::InvalidTopicName {
            name: name.to_string(),
        })
    }
}

fn render(conditions: &[Condition]) -> NotificationResult<String> {
    let mut expression = String::new();
    for condition in conditions {
        if let Some(operator) = condition.operator {
            expression.push_str(operator.as_str());
        }
        match &condition.operand {
            Operand::Topic(name) => {
                validate_name(name)?;
                expression.push_str(&format!("'{}' in topics", name));
            },
            Operand::Group(inner) => {
                expression.push('(');
                expression.push_str(&render(&inner.conditions)?);
                expression.push(')');
            },
        }
    }
    Ok(expression)
}
