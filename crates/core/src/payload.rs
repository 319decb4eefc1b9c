//! Inbound multiplication request shapes.
//!
//! Three body shapes reach the multiplication endpoint:
//!
//! - automation trigger: `{ "payload": { "inputFields": {..}, "inboundFieldValues": {..}, "recipeId": .. }, "runtimeMetadata": {..} }`
//! - action: `{ "payload": { "inputFields": {..} } }`
//! - direct (item view panel): `{ "boardId": .., "itemId": .., "sourceColumnId": .. }`
//!
//! [`MultiplicationPayload::from_json`] is the only place that tells them
//! apart; everything downstream works on a [`CalculationTarget`].

use serde::Deserialize;
use serde_json::Value;

use crate::types::flexible_id;

/// Column and item identifiers as supplied by the caller.
///
/// Every field may be missing; fallbacks are applied by the orchestrator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputFields {
    #[serde(default, deserialize_with = "flexible_id")]
    pub board_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub item_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub source_column_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub factor_column_id: Option<String>,
    #[serde(default, deserialize_with = "flexible_id")]
    pub target_column_id: Option<String>,
}

impl InputFields {
    /// Fill every missing field from `other`.
    fn or(self, other: InputFields) -> InputFields {
        InputFields {
            board_id: self.board_id.or(other.board_id),
            item_id: self.item_id.or(other.item_id),
            source_column_id: self.source_column_id.or(other.source_column_id),
            factor_column_id: self.factor_column_id.or(other.factor_column_id),
            target_column_id: self.target_column_id.or(other.target_column_id),
        }
    }
}

/// `payload` object of an automation trigger.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerBody {
    #[serde(default)]
    pub input_fields: InputFields,
    #[serde(default)]
    pub inbound_field_values: InputFields,
    #[serde(default)]
    pub block_kind: Option<String>,
    #[serde(default)]
    pub recipe_id: Option<Value>,
    #[serde(default)]
    pub integration_id: Option<Value>,
}

/// `payload` object of a direct action.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionBody {
    #[serde(default)]
    pub input_fields: InputFields,
}

/// Where a multiplication request came from. Decides the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOrigin {
    AutomationTrigger,
    Action,
}

/// A multiplication request body, disambiguated.
#[derive(Debug, Clone)]
pub enum MultiplicationPayload {
    AutomationTrigger {
        payload: TriggerBody,
        runtime_metadata: Option<Value>,
    },
    Action {
        payload: ActionBody,
    },
    Direct(InputFields),
}

impl MultiplicationPayload {
    /// Classify and decode a raw request body.
    ///
    /// A body with `runtimeMetadata`, or whose `payload` carries
    /// `inboundFieldValues` or `recipeId`, is a trigger. A body whose
    /// `payload` carries `inputFields` is an action. Anything else is read
    /// as a flat direct body.
    pub fn from_json(body: Value) -> Result<Self, serde_json::Error> {
        let inner = body.get("payload");
        let is_trigger = body.get("runtimeMetadata").is_some()
            || inner.is_some_and(|p| {
                p.get("inboundFieldValues").is_some() || p.get("recipeId").is_some()
            });
        let is_action = inner.is_some_and(|p| p.get("inputFields").is_some());

        if is_trigger {
            let runtime_metadata = body.get("runtimeMetadata").cloned();
            let payload = match inner {
                Some(p) => TriggerBody::deserialize(p)?,
                None => TriggerBody::default(),
            };
            Ok(MultiplicationPayload::AutomationTrigger {
                payload,
                runtime_metadata,
            })
        } else if is_action {
            let payload = match inner {
                Some(p) => ActionBody::deserialize(p)?,
                None => ActionBody::default(),
            };
            Ok(MultiplicationPayload::Action { payload })
        } else {
            Ok(MultiplicationPayload::Direct(InputFields::deserialize(&body)?))
        }
    }

    pub fn origin(&self) -> PayloadOrigin {
        match self {
            MultiplicationPayload::AutomationTrigger { .. } => PayloadOrigin::AutomationTrigger,
            MultiplicationPayload::Action { .. } | MultiplicationPayload::Direct(_) => {
                PayloadOrigin::Action
            }
        }
    }

    /// Collapse into the canonical identifier set.
    pub fn into_target(self) -> CalculationTarget {
        let origin = self.origin();
        let fields = match self {
            MultiplicationPayload::AutomationTrigger { payload, .. } => {
                payload.input_fields.or(payload.inbound_field_values)
            }
            MultiplicationPayload::Action { payload } => payload.input_fields,
            MultiplicationPayload::Direct(fields) => fields,
        };
        CalculationTarget { fields, origin }
    }
}

/// Canonical identifier set handed to the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationTarget {
    pub fields: InputFields,
    pub origin: PayloadOrigin,
}
