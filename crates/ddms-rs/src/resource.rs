// crates/ddms-rs/src/resource.rs

//! The root `ddms:resource` aggregate and the document-level entry points.

use crate::attributes::SecurityAttributes;
use crate::config::RenderOptions;
use crate::engine::{
    Builder, BuilderList, Component, DatePrecision, Source, Template, ValidationWarning, Validator,
    Warnings,
};
use crate::error::{DdmsError, ValidationError, VersionError, XmlError};
use crate::geospatial::{GeospatialCoverage, GeospatialCoverageBuilder};
use crate::producer::{ProducerKind, ProducerRole, ProducerRoleBuilder};
use crate::related::{self, RelatedResource, RelatedResourceBuilder, RelatedResources, RelatedResourcesBuilder};
use crate::security::{Security, SecurityBuilder};
use crate::subject::{SubjectCoverage, SubjectCoverageBuilder};
use crate::summary::{
    Dates, DatesBuilder, Description, DescriptionBuilder, Identifier, IdentifierBuilder, Language,
    LanguageBuilder, ResourceType, ResourceTypeBuilder, Rights, RightsBuilder, Subtitle,
    SubtitleBuilder, Title, TitleBuilder,
};
use crate::temporal::{TemporalCoverage, TemporalCoverageBuilder};
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::{self, Element};
use log::debug;

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

fn element_name(version: DdmsVersion) -> &'static str {
    if version.has(Feature::CapitalizedEntityNames) {
        "Resource"
    } else {
        "resource"
    }
}

/// Attributes on the root element.
///
/// The ISM group is forbidden in DDMS 2.0 and required from 3.0; the NTK
/// `DESVersion` exists from 4.0.1, where it is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceAttributes {
    pub resource_element: Option<bool>,
    pub create_date: Option<String>,
    pub ism_des_version: Option<i64>,
    pub ntk_des_version: Option<i64>,
    pub security: SecurityAttributes,
}

impl ResourceAttributes {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn has_ism(&self) -> bool {
        self.resource_element.is_some()
            || self.create_date.is_some()
            || self.ism_des_version.is_some()
            || !self.security.is_empty()
    }

    fn from_source(source: &Source) -> Result<Self, ValidationError> {
        Ok(Self {
            resource_element: source
                .boolean(source.attr(Namespace::Ism, "resourceElement"), "resourceElement")?,
            create_date: source.attr(Namespace::Ism, "createDate"),
            ism_des_version: source.integer(source.attr(Namespace::Ism, "DESVersion"), "DESVersion")?,
            ntk_des_version: source.integer(source.attr(Namespace::Ntk, "DESVersion"), "ntk:DESVersion")?,
            security: SecurityAttributes::from_source(source),
        })
    }

    fn validate(&self, v: &Validator) -> Result<(), ValidationError> {
        let version = v.version();
        if version.has(Feature::ResourceIsmAttributes) {
            self.security.require_marking(v)?;
            v.require_some(self.resource_element, "resourceElement attribute")?;
            let create_date = v.require_some(self.create_date.as_deref(), "createDate attribute")?;
            v.require_some(self.ism_des_version, "DESVersion attribute")?;
            if v.require_date(create_date, "createDate")?.precision() != DatePrecision::Date {
                return Err(v.fail("The createDate must be in the xs:date format (YYYY-MM-DD)."));
            }
        } else if self.has_ism() {
            v.require_since(DdmsVersion::V3_0, "security attributes on the resource")?;
        }
        if version.has(Feature::NeedToKnow) {
            v.require_some(self.ntk_des_version, "ntk:DESVersion attribute")?;
        } else if self.ntk_des_version.is_some() {
            v.require_since(DdmsVersion::V4_0_1, "ntk:DESVersion attribute")?;
        }
        Ok(())
    }

    fn render(&self, template: Template) -> Template {
        template
            .optional_attribute(Namespace::Ism, "resourceElement", self.resource_element)
            .optional_attribute(Namespace::Ism, "createDate", self.create_date.as_ref())
            .labelled_attribute(Namespace::Ism, "DESVersion", "ism.DESVersion", self.ism_des_version)
            .labelled_attribute(Namespace::Ntk, "DESVersion", "ntk.DESVersion", self.ntk_des_version)
            .security(&self.security)
    }
}

/// The child components of a resource, in output order.
///
/// Related resources are grouped under [`RelatedResources`] up to DDMS 3.1 and
/// listed individually from 4.0.1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ResourceContent {
    pub identifiers: Vec<Identifier>,
    pub titles: Vec<Title>,
    pub subtitles: Vec<Subtitle>,
    pub description: Option<Description>,
    pub languages: Vec<Language>,
    pub dates: Option<Dates>,
    pub rights: Option<Rights>,
    pub types: Vec<ResourceType>,
    pub producers: Vec<ProducerRole>,
    pub subject_coverages: Vec<SubjectCoverage>,
    pub temporal_coverages: Vec<TemporalCoverage>,
    pub geospatial_coverages: Vec<GeospatialCoverage>,
    pub related_resource_groups: Vec<RelatedResources>,
    pub related_resources: Vec<RelatedResource>,
    pub security: Option<Security>,
}

impl ResourceContent {
    fn require_compatible(&self, v: &Validator) -> Result<(), ValidationError> {
        v.require_compatible(&self.identifiers)?;
        v.require_compatible(&self.titles)?;
        v.require_compatible(&self.subtitles)?;
        v.require_compatible(&self.description)?;
        v.require_compatible(&self.languages)?;
        v.require_compatible(&self.dates)?;
        v.require_compatible(&self.rights)?;
        v.require_compatible(&self.types)?;
        v.require_compatible(&self.producers)?;
        v.require_compatible(&self.subject_coverages)?;
        v.require_compatible(&self.temporal_coverages)?;
        v.require_compatible(&self.geospatial_coverages)?;
        v.require_compatible(&self.related_resource_groups)?;
        v.require_compatible(&self.related_resources)?;
        v.require_compatible(&self.security)
    }

    fn absorb(&self, v: &mut Validator) {
        v.absorb_all(None, &self.identifiers);
        v.absorb_all(None, &self.titles);
        v.absorb_all(None, &self.subtitles);
        v.absorb_all(None, &self.description);
        v.absorb_all(None, &self.languages);
        v.absorb_all(None, &self.dates);
        v.absorb_all(None, &self.rights);
        v.absorb_all(None, &self.types);
        v.absorb_all(None, &self.producers);
        v.absorb_all(None, &self.subject_coverages);
        v.absorb_all(None, &self.temporal_coverages);
        v.absorb_all(None, &self.geospatial_coverages);
        v.absorb_all(None, &self.related_resource_groups);
        v.absorb_all(None, &self.related_resources);
        v.absorb_all(None, &self.security);
    }
}

/// A complete DDMS metacard.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Resource {
    version: DdmsVersion,
    content: ResourceContent,
    security: Security,
    attributes: ResourceAttributes,
    warnings: Warnings,
}

impl Resource {
    pub fn new(
        version: DdmsVersion,
        content: ResourceContent,
        attributes: ResourceAttributes,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, element_name(version));
        let security = v.require_some(content.security.clone(), "security")?;
        attributes.validate(&v)?;
        content.require_compatible(&v)?;

        if !content.related_resource_groups.is_empty() {
            v.require_until(DdmsVersion::V3_1, "relatedResources element")?;
        }
        if !content.related_resources.is_empty() && !version.has(Feature::FlatRelatedResources) {
            return Err(v.fail(format!(
                "The {} element must be grouped in a relatedResources element before DDMS 4.0.1.",
                version.qualified(Namespace::Ddms, "RelatedResource")
            )));
        }

        v.require_at_least(content.identifiers.len(), 1, "identifier")?;
        v.require_at_least(content.titles.len(), 1, "title")?;
        let creators = content
            .producers
            .iter()
            .filter(|p| p.kind() == ProducerKind::Creator)
            .count();
        v.require_at_least(creators, 1, "creator")?;
        let subjects = content.subject_coverages.len();
        if version.is_at_least(DdmsVersion::V4_0_1) {
            v.require_at_least(subjects, 1, "subjectCoverage")?;
        } else if subjects != 1 {
            return Err(v.fail("Exactly 1 subjectCoverage must exist."));
        }

        content.absorb(&mut v);
        Ok(Self {
            version,
            content,
            security,
            attributes,
            warnings: v.finish(),
        })
    }

    /// Parses a document and validates it under `version`.
    pub fn load(xml: &str, version: DdmsVersion) -> Result<Self, DdmsError> {
        let resource = Self::from_xml(version, xml)?;
        debug!(
            "Loaded DDMS {} resource with {} warning(s)",
            version,
            resource.warnings.len()
        );
        Ok(resource)
    }

    /// Parses a document, taking the revision from the root element's namespace.
    ///
    /// DDMS 4.0.1 and 4.1 share a namespace; such documents load as 4.1.
    pub fn load_detected(xml: &str) -> Result<Self, DdmsError> {
        let element = Element::parse(xml)?;
        let uri = element.name.namespace.clone().unwrap_or_default();
        let version = DdmsVersion::from_namespace(&uri).ok_or(VersionError::Unknown(uri))?;
        debug!("Detected DDMS {} from the root namespace", version);
        let resource = Self::from_element(version, &element)?;
        debug!(
            "Loaded DDMS {} resource with {} warning(s)",
            version,
            resource.warnings.len()
        );
        Ok(resource)
    }

    /// The resource as a standalone document, XML declaration included.
    pub fn to_xml_document(&self, options: &RenderOptions) -> Result<String, XmlError> {
        let body = xml::write(&self.to_element(), options)?;
        Ok(format!("{}\n{}", XML_DECLARATION, body))
    }

    pub fn content(&self) -> &ResourceContent {
        &self.content
    }

    pub fn attributes(&self) -> &ResourceAttributes {
        &self.attributes
    }

    pub fn identifiers(&self) -> &[Identifier] {
        &self.content.identifiers
    }

    pub fn titles(&self) -> &[Title] {
        &self.content.titles
    }

    pub fn subtitles(&self) -> &[Subtitle] {
        &self.content.subtitles
    }

    pub fn description(&self) -> Option<&Description> {
        self.content.description.as_ref()
    }

    pub fn languages(&self) -> &[Language] {
        &self.content.languages
    }

    pub fn dates(&self) -> Option<&Dates> {
        self.content.dates.as_ref()
    }

    pub fn rights(&self) -> Option<&Rights> {
        self.content.rights.as_ref()
    }

    pub fn types(&self) -> &[ResourceType] {
        &self.content.types
    }

    pub fn producers(&self) -> &[ProducerRole] {
        &self.content.producers
    }

    /// Producers in one role, in document order.
    pub fn producers_of(&self, kind: ProducerKind) -> impl Iterator<Item = &ProducerRole> {
        self.content.producers.iter().filter(move |p| p.kind() == kind)
    }

    pub fn subject_coverages(&self) -> &[SubjectCoverage] {
        &self.content.subject_coverages
    }

    pub fn temporal_coverages(&self) -> &[TemporalCoverage] {
        &self.content.temporal_coverages
    }

    pub fn geospatial_coverages(&self) -> &[GeospatialCoverage] {
        &self.content.geospatial_coverages
    }

    pub fn related_resource_groups(&self) -> &[RelatedResources] {
        &self.content.related_resource_groups
    }

    pub fn related_resources(&self) -> &[RelatedResource] {
        &self.content.related_resources
    }

    pub fn security(&self) -> &Security {
        &self.security
    }
}

/// The single occurrence of an optional child, failing when more than one is present.
fn at_most_one<T>(v: &Validator, mut found: Vec<T>, field: &str) -> Result<Option<T>, ValidationError> {
    v.require_at_most(found.len(), 1, field)?;
    Ok(found.pop())
}

impl Component for Resource {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, element_name(version))?;
        let v = Validator::new(version, Namespace::Ddms, element_name(version));
        let ddms = version.namespace_uri(Namespace::Ddms);
        let producers = element
            .children
            .iter()
            .filter(|c| {
                c.name.namespace.as_deref() == ddms
                    && ProducerKind::from_element_name(&c.name.local).is_some()
            })
            .map(|c| source.parse::<ProducerRole>(c))
            .collect::<Result<Vec<_>, _>>()?;
        let content = ResourceContent {
            identifiers: source.components(Namespace::Ddms, "identifier")?,
            titles: source.components(Namespace::Ddms, "title")?,
            subtitles: source.components(Namespace::Ddms, "subtitle")?,
            description: at_most_one(&v, source.components(Namespace::Ddms, "description")?, "description")?,
            languages: source.components(Namespace::Ddms, "language")?,
            dates: at_most_one(&v, source.components(Namespace::Ddms, "dates")?, "dates")?,
            rights: at_most_one(&v, source.components(Namespace::Ddms, "rights")?, "rights")?,
            types: source.components(Namespace::Ddms, "type")?,
            producers,
            subject_coverages: source.components(Namespace::Ddms, "subjectCoverage")?,
            temporal_coverages: source.components(Namespace::Ddms, "temporalCoverage")?,
            geospatial_coverages: source.components(Namespace::Ddms, "geospatialCoverage")?,
            related_resource_groups: source.components(Namespace::Ddms, "relatedResources")?,
            related_resources: source.components(Namespace::Ddms, related::resource_name(version))?,
            security: at_most_one(&v, source.components(Namespace::Ddms, "security")?, "security")?,
        };
        Self::new(version, content, ResourceAttributes::from_source(&source)?)
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        element_name(self.version)
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let c = &self.content;
        let template = Template::new(self.version, Namespace::Ddms, element_name(self.version));
        self.attributes
            .render(template)
            .children(&c.identifiers)
            .children(&c.titles)
            .children(&c.subtitles)
            .optional_child(c.description.as_ref())
            .children(&c.languages)
            .optional_child(c.dates.as_ref())
            .optional_child(c.rights.as_ref())
            .children(&c.types)
            .children(&c.producers)
            .children(&c.subject_coverages)
            .children(&c.temporal_coverages)
            .children(&c.geospatial_coverages)
            .children(&c.related_resource_groups)
            .children(&c.related_resources)
            .child(&self.security)
    }
}

/// Assembles a [`Resource`] one field at a time.
///
/// ```ignore
/// let mut builder = ResourceBuilder::default();
/// builder.identifiers.slot(0).qualifier = Some("URI".to_string());
/// builder.identifiers.slot(0).value = Some("urn:buri:ddmsence:testing".to_string());
/// let resource = builder.commit(DdmsVersion::V4_1)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceBuilder {
    pub identifiers: BuilderList<IdentifierBuilder>,
    pub titles: BuilderList<TitleBuilder>,
    pub subtitles: BuilderList<SubtitleBuilder>,
    pub description: DescriptionBuilder,
    pub languages: BuilderList<LanguageBuilder>,
    pub dates: DatesBuilder,
    pub rights: RightsBuilder,
    pub types: BuilderList<ResourceTypeBuilder>,
    pub producers: BuilderList<ProducerRoleBuilder>,
    pub subject_coverages: BuilderList<SubjectCoverageBuilder>,
    pub temporal_coverages: BuilderList<TemporalCoverageBuilder>,
    pub geospatial_coverages: BuilderList<GeospatialCoverageBuilder>,
    pub related_resource_groups: BuilderList<RelatedResourcesBuilder>,
    pub related_resources: BuilderList<RelatedResourceBuilder>,
    pub security: SecurityBuilder,
    pub attributes: ResourceAttributes,
}

impl From<&Resource> for ResourceBuilder {
    fn from(resource: &Resource) -> Self {
        let c = &resource.content;
        Self {
            identifiers: BuilderList::of(&c.identifiers),
            titles: BuilderList::of(&c.titles),
            subtitles: BuilderList::of(&c.subtitles),
            description: c.description.as_ref().map(DescriptionBuilder::from).unwrap_or_default(),
            languages: BuilderList::of(&c.languages),
            dates: c.dates.as_ref().map(DatesBuilder::from).unwrap_or_default(),
            rights: c.rights.as_ref().map(RightsBuilder::from).unwrap_or_default(),
            types: BuilderList::of(&c.types),
            producers: BuilderList::of(&c.producers),
            subject_coverages: BuilderList::of(&c.subject_coverages),
            temporal_coverages: BuilderList::of(&c.temporal_coverages),
            geospatial_coverages: BuilderList::of(&c.geospatial_coverages),
            related_resource_groups: BuilderList::of(&c.related_resource_groups),
            related_resources: BuilderList::of(&c.related_resources),
            security: SecurityBuilder::from(&resource.security),
            attributes: resource.attributes.clone(),
        }
    }
}

impl Builder for ResourceBuilder {
    type Target = Resource;

    fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
            && self.titles.is_empty()
            && self.subtitles.is_empty()
            && self.description.is_empty()
            && self.languages.is_empty()
            && self.dates.is_empty()
            && self.rights.is_empty()
            && self.types.is_empty()
            && self.producers.is_empty()
            && self.subject_coverages.is_empty()
            && self.temporal_coverages.is_empty()
            && self.geospatial_coverages.is_empty()
            && self.related_resource_groups.is_empty()
            && self.related_resources.is_empty()
            && self.security.is_empty()
            && self.attributes.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Resource>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        let content = ResourceContent {
            identifiers: self.identifiers.commit_all(version)?,
            titles: self.titles.commit_all(version)?,
            subtitles: self.subtitles.commit_all(version)?,
            description: self.description.commit(version)?,
            languages: self.languages.commit_all(version)?,
            dates: self.dates.commit(version)?,
            rights: self.rights.commit(version)?,
            types: self.types.commit_all(version)?,
            producers: self.producers.commit_all(version)?,
            subject_coverages: self.subject_coverages.commit_all(version)?,
            temporal_coverages: self.temporal_coverages.commit_all(version)?,
            geospatial_coverages: self.geospatial_coverages.commit_all(version)?,
            related_resource_groups: self.related_resource_groups.commit_all(version)?,
            related_resources: self.related_resources.commit_all(version)?,
            security: self.security.commit(version)?,
        };
        Resource::new(version, content, self.attributes.clone()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::producer::Person;
    use crate::subject::Keyword;

    fn marking() -> SecurityAttributes {
        SecurityAttributes::new("U", &["USA"])
    }

    fn attributes(version: DdmsVersion) -> ResourceAttributes {
        if !version.has(Feature::ResourceIsmAttributes) {
            return ResourceAttributes::default();
        }
        ResourceAttributes {
            resource_element: Some(true),
            create_date: Some("2010-01-21".to_string()),
            ism_des_version: Some(9),
            ntk_des_version: version.has(Feature::NeedToKnow).then_some(7),
            security: marking(),
        }
    }

    fn content(version: DdmsVersion) -> ResourceContent {
        let person = Person::new(version, &["Brian"], "Uri", None, &[], &[], &[]).unwrap();
        let keyword = Keyword::new(version, "DDMSence").unwrap();
        ResourceContent {
            identifiers: vec![Identifier::new(version, "URI", "urn:buri:ddmsence:testing").unwrap()],
            titles: vec![Title::new(version, "DDMSence", marking()).unwrap()],
            producers: vec![ProducerRole::new(
                version,
                ProducerKind::Creator,
                person,
                &[],
                SecurityAttributes::default(),
            )
            .unwrap()],
            subject_coverages: vec![
                SubjectCoverage::new(version, vec![keyword], vec![], vec![], vec![]).unwrap(),
            ],
            security: Some(Security::new(version, marking()).unwrap()),
            ..ResourceContent::default()
        }
    }

    #[test]
    fn test_minimal_resource_in_every_version() {
        for version in DdmsVersion::ALL {
            let resource = Resource::new(version, content(version), attributes(version)).unwrap();
            assert_eq!(resource.name(), element_name(version));
            let reparsed = Resource::load(&resource.to_xml().unwrap(), version).unwrap();
            assert_eq!(reparsed, resource);
            assert_eq!(
                ResourceBuilder::from(&resource).commit(version),
                Ok(Some(resource))
            );
        }
    }

    #[test]
    fn test_root_attribute_rules() {
        let err = Resource::new(DdmsVersion::V2_0, content(DdmsVersion::V2_0), attributes(DdmsVersion::V3_0))
            .unwrap_err();
        assert_eq!(
            err.message(),
            "The security attributes on the resource cannot be used until DDMS 3.0 or later."
        );

        let mut missing = attributes(DdmsVersion::V4_1);
        missing.ntk_des_version = None;
        let err = Resource::new(DdmsVersion::V4_1, content(DdmsVersion::V4_1), missing).unwrap_err();
        assert_eq!(err.message(), "ntk:DESVersion attribute is required.");

        let mut year_only = attributes(DdmsVersion::V3_1);
        year_only.create_date = Some("2010".to_string());
        let err = Resource::new(DdmsVersion::V3_1, content(DdmsVersion::V3_1), year_only).unwrap_err();
        assert_eq!(
            err.message(),
            "The createDate must be in the xs:date format (YYYY-MM-DD)."
        );
    }

    #[test]
    fn test_cardinality() {
        let mut no_creator = content(DdmsVersion::V4_1);
        no_creator.producers.clear();
        let err = Resource::new(DdmsVersion::V4_1, no_creator, attributes(DdmsVersion::V4_1)).unwrap_err();
        assert_eq!(err.message(), "At least 1 creator must exist.");

        let mut two_subjects = content(DdmsVersion::V3_0);
        let extra = two_subjects.subject_coverages[0].clone();
        two_subjects.subject_coverages.push(extra);
        let err = Resource::new(DdmsVersion::V3_0, two_subjects, attributes(DdmsVersion::V3_0)).unwrap_err();
        assert_eq!(err.message(), "Exactly 1 subjectCoverage must exist.");

        let mut no_security = content(DdmsVersion::V4_1);
        no_security.security = None;
        let err = Resource::new(DdmsVersion::V4_1, no_security, attributes(DdmsVersion::V4_1)).unwrap_err();
        assert_eq!(err.message(), "security is required.");
    }

    #[test]
    fn test_mixed_versions_are_rejected() {
        let mut mixed = content(DdmsVersion::V4_1);
        mixed.identifiers = vec![Identifier::new(DdmsVersion::V3_1, "URI", "urn:x").unwrap()];
        let err = Resource::new(DdmsVersion::V4_1, mixed, attributes(DdmsVersion::V4_1)).unwrap_err();
        assert_eq!(
            err.message(),
            "A child component, ddms:identifier, is using a different version of DDMS."
        );
    }

    #[test]
    fn test_document_output() {
        let resource =
            Resource::new(DdmsVersion::V4_1, content(DdmsVersion::V4_1), attributes(DdmsVersion::V4_1))
                .unwrap();
        let document = resource.to_xml_document(&RenderOptions::pretty()).unwrap();
        assert!(document.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<ddms:resource"));
        let reloaded = Resource::load_detected(&document).unwrap();
        assert_eq!(reloaded, resource);

        let text = resource.to_text();
        assert!(text.contains("resource.ism.DESVersion: 9\n"));
        assert!(text.contains("resource.ntk.DESVersion: 7\n"));
        assert!(text.ends_with("resource.security.ownerProducer: USA\n"));
    }
}
