//! Per-user settings of features and tree branches.
//!
//! Settings are not part of the shared feature data: every user has own settings for the same feature (for example
//! a different display color), so all settings carry the id of the user and of the object they belong to.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::DisplayColor;

/// Members shared by all feature settings.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FeatureSettings {
    /// Id of the settings record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id of the feature the settings belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_id: Option<String>,
    /// Id of the user the settings belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Settings of a waypoint.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WptSettings {
    /// Shared members.
    #[serde(flatten)]
    pub common: FeatureSettings,
}

/// Settings of a track.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrkSettings {
    /// Shared members.
    #[serde(flatten)]
    pub common: FeatureSettings,
    /// Color the track is drawn with. `null` in JSON keeps the default.
    #[serde(deserialize_with = "display_color_or_default")]
    pub display_color: DisplayColor,
}

/// Settings of a route.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RteSettings {
    /// Shared members.
    #[serde(flatten)]
    pub common: FeatureSettings,
    /// Color the route is drawn with. `null` in JSON keeps the default.
    #[serde(deserialize_with = "display_color_or_default")]
    pub display_color: DisplayColor,
}

/// Settings of a tree branch (folder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BranchSettings {
    /// Id of the settings record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Id of the branch the settings belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    /// Id of the user the settings belong to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Whether the folder is expanded in the tree view.
    pub open: bool,
    /// Whether the contents of the folder are shown on the map.
    pub visible: bool,
}

impl Default for BranchSettings {
    fn default() -> Self {
        Self {
            id: None,
            node_id: None,
            user_id: None,
            open: false,
            visible: true,
        }
    }
}

fn display_color_or_default<'de, D>(deserializer: D) -> Result<DisplayColor, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<DisplayColor>::deserialize(deserializer)?.unwrap_or_default())
}
