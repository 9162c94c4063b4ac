//! Component snapshot and change event types
//!
//! A snapshot is the structural digest of one UI component. Two snapshot collections are
//! compared by the differ, which produces `ChangeEvent`s.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// UI framework a component snapshot was extracted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
}

impl Framework {
    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "react" => Ok(Framework::React),
            "vue" => Ok(Framework::Vue),
            _ => Err(format!(
                "Unknown framework: {}. Valid values: react, vue",
                s
            )),
        }
    }
}

/// Structural digest of one UI component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSnapshot {
    pub component_name: String,
    pub framework: Framework,
    pub file_path: String,
    pub props: BTreeSet<String>,
    pub hooks_or_lifecycle: BTreeSet<String>,
    pub event_bindings: BTreeSet<String>,
    pub render_elements: BTreeSet<String>,
}

impl ComponentSnapshot {
    pub fn new(
        component_name: impl Into<String>,
        framework: Framework,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            component_name: component_name.into(),
            framework,
            file_path: file_path.into(),
            props: BTreeSet::new(),
            hooks_or_lifecycle: BTreeSet::new(),
            event_bindings: BTreeSet::new(),
            render_elements: BTreeSet::new(),
        }
    }

    /// Identity of this snapshot within a collection
    pub fn key(&self) -> ComponentKey {
        ComponentKey::new(self.framework, &self.file_path, &self.component_name)
    }

    /// Read one of the four compared fields
    pub fn field(&self, field: SnapshotField) -> &BTreeSet<String> {
        match field {
            SnapshotField::Props => &self.props,
            SnapshotField::HooksOrLifecycle => &self.hooks_or_lifecycle,
            SnapshotField::EventBindings => &self.event_bindings,
            SnapshotField::RenderElements => &self.render_elements,
        }
    }
}

/// Type-safe identity key: framework + file path + component name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentKey(String);

impl ComponentKey {
    pub fn new(framework: Framework, file_path: &str, component_name: &str) -> Self {
        Self(format!("{}:{}:{}", framework, file_path, component_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four set-valued fields the differ compares, in comparison order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotField {
    Props,
    HooksOrLifecycle,
    EventBindings,
    RenderElements,
}

impl SnapshotField {
    pub const ALL: [SnapshotField; 4] = [
        SnapshotField::Props,
        SnapshotField::HooksOrLifecycle,
        SnapshotField::EventBindings,
        SnapshotField::RenderElements,
    ];

    pub fn added(&self) -> ChangeType {
        match self {
            SnapshotField::Props => ChangeType::AddedProp,
            SnapshotField::HooksOrLifecycle => ChangeType::AddedHook,
            SnapshotField::EventBindings => ChangeType::AddedEventBinding,
            SnapshotField::RenderElements => ChangeType::AddedRenderElement,
        }
    }

    pub fn removed(&self) -> ChangeType {
        match self {
            SnapshotField::Props => ChangeType::RemovedProp,
            SnapshotField::HooksOrLifecycle => ChangeType::RemovedHook,
            SnapshotField::EventBindings => ChangeType::RemovedEventBinding,
            SnapshotField::RenderElements => ChangeType::RemovedRenderElement,
        }
    }
}

/// Kind of structural change between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeType {
    ComponentAdded,
    ComponentDeleted,
    AddedProp,
    RemovedProp,
    AddedHook,
    RemovedHook,
    AddedEventBinding,
    RemovedEventBinding,
    AddedRenderElement,
    RemovedRenderElement,
}

impl ChangeType {
    /// Field this change refers to, `None` for whole-component events
    pub fn field(&self) -> Option<SnapshotField> {
        match self {
            ChangeType::ComponentAdded | ChangeType::ComponentDeleted => None,
            ChangeType::AddedProp | ChangeType::RemovedProp => Some(SnapshotField::Props),
            ChangeType::AddedHook | ChangeType::RemovedHook => {
                Some(SnapshotField::HooksOrLifecycle)
            }
            ChangeType::AddedEventBinding | ChangeType::RemovedEventBinding => {
                Some(SnapshotField::EventBindings)
            }
            ChangeType::AddedRenderElement | ChangeType::RemovedRenderElement => {
                Some(SnapshotField::RenderElements)
            }
        }
    }
}

/// One structural change reported by the differ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    pub component: String,
    pub file_path: String,
    pub change_type: ChangeType,
    pub before: Option<Vec<String>>,
    pub after: Option<Vec<String>>,
}

impl ChangeEvent {
    /// Whole-component event (added / deleted); carries no field values
    pub fn component(snapshot: &ComponentSnapshot, change_type: ChangeType) -> Self {
        Self {
            component: snapshot.component_name.clone(),
            file_path: snapshot.file_path.clone(),
            change_type,
            before: None,
            after: None,
        }
    }
}
