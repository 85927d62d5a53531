//! Display metadata: hint tags, usage flags and the property record
//!
//! Integer encodings match the Godot 4 `PropertyHint` / `PropertyUsageFlags`
//! tables so a record can be handed to that host unchanged.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum_macros::{EnumIter, FromRepr};

use crate::variant::VariantType;

/// Inspector widget selector
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter, FromRepr, Serialize, Deserialize,
)]
#[serde(into = "i32", try_from = "i32")]
#[repr(i32)]
#[allow(missing_docs, reason = "variants mirror the host tag table")]
pub enum PropertyHint {
    #[default]
    None                 = 0,
    Range                = 1,
    Enum                 = 2,
    EnumSuggestion       = 3,
    ExpEasing            = 4,
    Link                 = 5,
    Flags                = 6,
    Layers2DRender       = 7,
    Layers2DPhysics      = 8,
    Layers2DNavigation   = 9,
    Layers3DRender       = 10,
    Layers3DPhysics      = 11,
    Layers3DNavigation   = 12,
    File                 = 13,
    Dir                  = 14,
    GlobalFile           = 15,
    GlobalDir            = 16,
    ResourceType         = 17,
    MultilineText        = 18,
    Expression           = 19,
    PlaceholderText      = 20,
    ColorNoAlpha         = 21,
    ObjectId             = 22,
    TypeString           = 23,
    NodePathToEditedNode = 24,
    ObjectTooBig         = 25,
    NodePathValidTypes   = 26,
    SaveFile             = 27,
    GlobalSaveFile       = 28,
    IntIsObjectId        = 29,
    IntIsPointer         = 30,
    ArrayType            = 31,
    LocaleId             = 32,
    LocalizableString    = 33,
    NodeType             = 34,
    HideQuaternionEdit   = 35,
    Password             = 36,
    LayersAvoidance      = 37,
    DictionaryType       = 38,
    ToolButton           = 39,
    OneShot              = 40,
}

impl From<PropertyHint> for i32 {
    fn from(value: PropertyHint) -> Self { value as Self }
}

impl TryFrom<i32> for PropertyHint {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_repr(value).ok_or_else(|| format!("Invalid property hint code: {value}"))
    }
}

bitflags! {
    /// Bit-set controlling whether and how a property is shown and stored
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PropertyUsageFlags: u32 {
        /// Serialized with the owner
        const STORAGE = 1 << 1;
        /// Shown in the inspector
        const EDITOR = 1 << 2;
        /// Hidden from the documentation and script listings
        const INTERNAL = 1 << 3;
        /// Shown with a checkbox
        const CHECKABLE = 1 << 4;
        /// Checkbox is ticked
        const CHECKED = 1 << 5;
        /// Starts an inspector group
        const GROUP = 1 << 6;
        /// Starts an inspector category
        const CATEGORY = 1 << 7;
        /// Starts an inspector subgroup
        const SUBGROUP = 1 << 8;
        /// Integer is a bitfield of a class enum
        const CLASS_IS_BITFIELD = 1 << 9;
        /// Not saved in instance state
        const NO_INSTANCE_STATE = 1 << 10;
        /// Editing asks for an editor restart
        const RESTART_IF_CHANGED = 1 << 11;
        /// Declared by a script
        const SCRIPT_VARIABLE = 1 << 12;
        /// Stored even when null
        const STORE_IF_NULL = 1 << 13;
        /// Editing refreshes the whole inspector
        const UPDATE_ALL_IF_MODIFIED = 1 << 14;
        /// Integer is a class enum
        const CLASS_IS_ENUM = 1 << 16;
        /// Nil value stands for any variant
        const NIL_IS_VARIANT = 1 << 17;
        /// Property is an array header
        const ARRAY = 1 << 18;
        /// Resource is always duplicated with its owner
        const ALWAYS_DUPLICATE = 1 << 19;
        /// Resource is never duplicated with its owner
        const NEVER_DUPLICATE = 1 << 20;
        /// Only shown on high-end renderers
        const HIGH_END_GFX = 1 << 21;
        /// Node path is relative to the scene root
        const NODE_PATH_FROM_SCENE_ROOT = 1 << 22;
        /// Resource is not saved with its owner
        const RESOURCE_NOT_PERSISTENT = 1 << 23;
        /// Animation keys increment the value
        const KEYING_INCREMENTS = 1 << 24;
        /// Resource is set after loading
        const DEFERRED_SET_RESOURCE = 1 << 25;
        /// Inspector instantiates a new object on edit
        const EDITOR_INSTANTIATE_OBJECT = 1 << 26;
        /// Shown in the basic settings view
        const EDITOR_BASIC_SETTING = 1 << 27;
        /// Shown but not editable
        const READ_ONLY = 1 << 28;
        /// Value is kept out of exported files
        const SECRET = 1 << 29;

        /// Stored and shown in the inspector
        const DEFAULT = Self::STORAGE.bits() | Self::EDITOR.bits();
        /// Stored but not shown
        const NO_EDITOR = Self::STORAGE.bits();
    }
}

impl Default for PropertyUsageFlags {
    fn default() -> Self { Self::DEFAULT }
}

impl Serialize for PropertyUsageFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for PropertyUsageFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        u32::deserialize(deserializer).map(Self::from_bits_retain)
    }
}

/// Display record the host reads to render one property
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    /// Property name
    pub name:         String,
    /// Value-kind tag
    #[serde(rename = "type")]
    pub variant_type: VariantType,
    /// Hint tag
    pub hint:         PropertyHint,
    /// Free-form hint payload, empty when unused
    pub hint_string:  String,
    /// Usage flags
    pub usage:        PropertyUsageFlags,
}
