// crates/ddms-rs/src/version.rs

//! Registry of the supported DDMS schema revisions.
//!
//! Every revision is described by one static [`SchemaVersion`] entry holding its
//! namespace table and feature flags. [`DdmsVersion`] is the small, ordered handle
//! that components carry and pass around; comparisons between handles follow the
//! publication order of the revisions.

use crate::error::VersionError;
use crate::xml::QName;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// XML vocabularies a component may take names from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Ddms,
    Ism,
    Ntk,
    Gml,
    Xlink,
}

/// Structural switches that differ between revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    /// Coordinate and extent children are capitalized (`WestBL`, `MinVerticalExtent`).
    CapitalizedChildNames,
    /// Producer entities and the root are capitalized (`Organization`, `Resource`).
    CapitalizedEntityNames,
    /// Subject and geospatial coverage wrap their content (`Subject`, `GeospatialExtent`).
    CoverageWrappers,
    /// The root carries `resourceElement`, `createDate` and `DESVersion` from ISM.
    ResourceIsmAttributes,
    /// `ddms:security` carries a fixed `excludeFromRollup="true"`.
    ExcludeFromRollup,
    /// Need-to-know markings are available.
    NeedToKnow,
    /// Related resources are flat `relatedResource` elements.
    FlatRelatedResources,
}

/// Static description of one schema revision.
#[derive(Debug, PartialEq, Eq)]
pub struct SchemaVersion {
    pub id: &'static str,
    pub ddms_namespace: &'static str,
    pub ism_namespace: &'static str,
    pub ism_prefix: &'static str,
    pub ntk_namespace: Option<&'static str>,
    pub gml_namespace: &'static str,
    pub xlink_namespace: &'static str,
    pub features: &'static [Feature],
}

const XLINK: &str = "http://www.w3.org/1999/xlink";
const GML_3_2: &str = "http://www.opengis.net/gml/3.2";
const ISM: &str = "urn:us:gov:ic:ism";
const NTK: &str = "urn:us:gov:ic:ntk";
const DDMS_4: &str = "urn:us:mil:ces:metadata:ddms:4";

/// Indexed by `DdmsVersion as usize`.
static REGISTRY: [SchemaVersion; 5] = [
    SchemaVersion {
        id: "2.0",
        ddms_namespace: "http://metadata.dod.mil/mdr/ns/DDMS/2.0/",
        ism_namespace: "urn:us:gov:ic:ism:v2",
        ism_prefix: "ICISM",
        ntk_namespace: None,
        gml_namespace: "http://www.opengis.net/gml",
        xlink_namespace: XLINK,
        features: &[
            Feature::CapitalizedChildNames,
            Feature::CapitalizedEntityNames,
            Feature::CoverageWrappers,
        ],
    },
    SchemaVersion {
        id: "3.0",
        ddms_namespace: "http://metadata.dod.mil/mdr/ns/DDMS/3.0/",
        ism_namespace: ISM,
        ism_prefix: "ISM",
        ntk_namespace: None,
        gml_namespace: GML_3_2,
        xlink_namespace: XLINK,
        features: &[
            Feature::CapitalizedChildNames,
            Feature::CapitalizedEntityNames,
            Feature::CoverageWrappers,
            Feature::ResourceIsmAttributes,
            Feature::ExcludeFromRollup,
        ],
    },
    SchemaVersion {
        id: "3.1",
        ddms_namespace: "http://metadata.dod.mil/mdr/ns/DDMS/3.1/",
        ism_namespace: ISM,
        ism_prefix: "ISM",
        ntk_namespace: None,
        gml_namespace: GML_3_2,
        xlink_namespace: XLINK,
        features: &[
            Feature::CapitalizedChildNames,
            Feature::CapitalizedEntityNames,
            Feature::CoverageWrappers,
            Feature::ResourceIsmAttributes,
            Feature::ExcludeFromRollup,
        ],
    },
    SchemaVersion {
        id: "4.0.1",
        ddms_namespace: DDMS_4,
        ism_namespace: ISM,
        ism_prefix: "ISM",
        ntk_namespace: Some(NTK),
        gml_namespace: GML_3_2,
        xlink_namespace: XLINK,
        features: &[
            Feature::ResourceIsmAttributes,
            Feature::ExcludeFromRollup,
            Feature::NeedToKnow,
            Feature::FlatRelatedResources,
        ],
    },
    SchemaVersion {
        id: "4.1",
        ddms_namespace: DDMS_4,
        ism_namespace: ISM,
        ism_prefix: "ISM",
        ntk_namespace: Some(NTK),
        gml_namespace: GML_3_2,
        xlink_namespace: XLINK,
        features: &[
            Feature::ResourceIsmAttributes,
            Feature::ExcludeFromRollup,
            Feature::NeedToKnow,
            Feature::FlatRelatedResources,
        ],
    },
];

/// A supported DDMS revision. Ordering follows publication order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DdmsVersion {
    V2_0,
    V3_0,
    V3_1,
    V4_0_1,
    V4_1,
}

impl DdmsVersion {
    /// All revisions, oldest first.
    pub const ALL: [DdmsVersion; 5] = [
        DdmsVersion::V2_0,
        DdmsVersion::V3_0,
        DdmsVersion::V3_1,
        DdmsVersion::V4_0_1,
        DdmsVersion::V4_1,
    ];

    /// Resolves a version identifier such as `"3.1"`.
    ///
    /// `"4.0"` is accepted as an alias of `"4.0.1"`.
    pub fn resolve(id: &str) -> Result<Self, VersionError> {
        match id.trim() {
            "2.0" => Ok(DdmsVersion::V2_0),
            "3.0" => Ok(DdmsVersion::V3_0),
            "3.1" => Ok(DdmsVersion::V3_1),
            "4.0" | "4.0.1" => Ok(DdmsVersion::V4_0_1),
            "4.1" => Ok(DdmsVersion::V4_1),
            other => Err(VersionError::Unknown(other.to_string())),
        }
    }

    /// The newest supported revision.
    pub fn latest() -> Self {
        DdmsVersion::V4_1
    }

    /// Finds the newest revision whose DDMS namespace is `uri`.
    pub fn from_namespace(uri: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|v| v.schema().ddms_namespace == uri)
    }

    pub fn schema(self) -> &'static SchemaVersion {
        &REGISTRY[self as usize]
    }

    pub fn id(self) -> &'static str {
        self.schema().id
    }

    /// Position in publication order, starting at 0.
    pub fn rank(self) -> u8 {
        self as u8
    }

    pub fn is_at_least(self, other: DdmsVersion) -> bool {
        self >= other
    }

    pub fn has(self, feature: Feature) -> bool {
        self.schema().features.contains(&feature)
    }

    /// Namespace URI for a vocabulary, or `None` if this revision lacks it.
    pub fn namespace_uri(self, namespace: Namespace) -> Option<&'static str> {
        let schema = self.schema();
        match namespace {
            Namespace::Ddms => Some(schema.ddms_namespace),
            Namespace::Ism => Some(schema.ism_namespace),
            Namespace::Ntk => schema.ntk_namespace,
            Namespace::Gml => Some(schema.gml_namespace),
            Namespace::Xlink => Some(schema.xlink_namespace),
        }
    }

    pub fn prefix(self, namespace: Namespace) -> &'static str {
        match namespace {
            Namespace::Ddms => "ddms",
            Namespace::Ism => self.schema().ism_prefix,
            Namespace::Ntk => "ntk",
            Namespace::Gml => "gml",
            Namespace::Xlink => "xlink",
        }
    }

    /// Builds the namespace-qualified name used when writing XML.
    pub fn qname(self, namespace: Namespace, local: &str) -> QName {
        QName::qualified(
            self.namespace_uri(namespace).unwrap_or_default(),
            self.prefix(namespace),
            local,
        )
    }

    /// `prefix:local`, as used in locators.
    pub fn qualified(self, namespace: Namespace, local: &str) -> String {
        format!("{}:{}", self.prefix(namespace), local)
    }
}

impl fmt::Display for DdmsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DdmsVersion {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::resolve(s)
    }
}

impl TryFrom<String> for DdmsVersion {
    type Error = VersionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::resolve(&value)
    }
}

impl From<DdmsVersion> for String {
    fn from(version: DdmsVersion) -> Self {
        version.id().to_string()
    }
}

/// Caller-owned "current version" selection.
///
/// Nothing in the crate reads this implicitly; it exists for callers that want to
/// select a revision once (for example from a CLI flag) and hand it to each
/// construction call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionContext {
    current: Option<DdmsVersion>,
}

impl VersionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(version: DdmsVersion) -> Self {
        Self {
            current: Some(version),
        }
    }

    /// Selects the revision named by `id`. The previous selection is kept on failure.
    pub fn set_current(&mut self, id: &str) -> Result<DdmsVersion, VersionError> {
        let version = DdmsVersion::resolve(id)?;
        self.current = Some(version);
        Ok(version)
    }

    pub fn current(&self) -> Result<DdmsVersion, VersionError> {
        self.current.ok_or(VersionError::NoneSelected)
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_identifiers() {
        assert_eq!(DdmsVersion::resolve("2.0"), Ok(DdmsVersion::V2_0));
        assert_eq!(DdmsVersion::resolve("3.0"), Ok(DdmsVersion::V3_0));
        assert_eq!(DdmsVersion::resolve("3.1"), Ok(DdmsVersion::V3_1));
        assert_eq!(DdmsVersion::resolve("4.0.1"), Ok(DdmsVersion::V4_0_1));
        assert_eq!(DdmsVersion::resolve("4.0"), Ok(DdmsVersion::V4_0_1));
        assert_eq!(DdmsVersion::resolve(" 4.1 "), Ok(DdmsVersion::V4_1));
    }

    #[test]
    fn test_resolve_unknown_identifier() {
        assert_eq!(
            DdmsVersion::resolve("1.4"),
            Err(VersionError::Unknown("1.4".to_string()))
        );
        assert!("5.0".parse::<DdmsVersion>().is_err());
    }

    #[test]
    fn test_ordering_and_is_at_least() {
        assert!(DdmsVersion::V4_1.is_at_least(DdmsVersion::V4_0_1));
        assert!(DdmsVersion::V3_1.is_at_least(DdmsVersion::V3_1));
        assert!(!DdmsVersion::V3_0.is_at_least(DdmsVersion::V3_1));
        let ranks: Vec<u8> = DdmsVersion::ALL.iter().map(|v| v.rank()).collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_registry_is_aligned_with_enum() {
        for version in DdmsVersion::ALL {
            assert_eq!(DdmsVersion::resolve(version.id()), Ok(version));
        }
    }

    #[test]
    fn test_namespace_table() {
        assert_eq!(DdmsVersion::V2_0.prefix(Namespace::Ism), "ICISM");
        assert_eq!(DdmsVersion::V3_0.prefix(Namespace::Ism), "ISM");
        assert_eq!(DdmsVersion::V3_1.namespace_uri(Namespace::Ntk), None);
        assert_eq!(
            DdmsVersion::V4_0_1.namespace_uri(Namespace::Ntk),
            Some("urn:us:gov:ic:ntk")
        );
        assert_eq!(
            DdmsVersion::V2_0.namespace_uri(Namespace::Gml),
            Some("http://www.opengis.net/gml")
        );
        assert_eq!(DdmsVersion::V4_1.qualified(Namespace::Gml, "pos"), "gml:pos");
    }

    #[test]
    fn test_from_namespace_prefers_newest() {
        assert_eq!(
            DdmsVersion::from_namespace("urn:us:mil:ces:metadata:ddms:4"),
            Some(DdmsVersion::V4_1)
        );
        assert_eq!(
            DdmsVersion::from_namespace("http://metadata.dod.mil/mdr/ns/DDMS/3.0/"),
            Some(DdmsVersion::V3_0)
        );
        assert_eq!(DdmsVersion::from_namespace("urn:example"), None);
    }

    #[test]
    fn test_features() {
        assert!(DdmsVersion::V3_1.has(Feature::CoverageWrappers));
        assert!(!DdmsVersion::V4_0_1.has(Feature::CoverageWrappers));
        assert!(!DdmsVersion::V2_0.has(Feature::ExcludeFromRollup));
        assert!(DdmsVersion::V4_1.has(Feature::NeedToKnow));
    }

    #[test]
    fn test_version_context() {
        let mut context = VersionContext::new();
        assert_eq!(context.current(), Err(VersionError::NoneSelected));

        assert_eq!(context.set_current("3.1"), Ok(DdmsVersion::V3_1));
        assert_eq!(context.current(), Ok(DdmsVersion::V3_1));

        // A failed selection leaves the previous one in place.
        assert!(context.set_current("9.9").is_err());
        assert_eq!(context.current(), Ok(DdmsVersion::V3_1));

        context.clear();
        assert_eq!(context.current(), Err(VersionError::NoneSelected));
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&DdmsVersion::V4_0_1).unwrap();
        assert_eq!(json, "\"4.0.1\"");
        let parsed: DdmsVersion = serde_json::from_str("\"3.0\"").unwrap();
        assert_eq!(parsed, DdmsVersion::V3_0);
        assert!(serde_json::from_str::<DdmsVersion>("\"1.0\"").is_err());
    }
}
