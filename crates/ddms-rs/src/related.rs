// crates/ddms-rs/src/related.rs

//! Related resources and the XLink locators that point at them.
//!
//! Up to DDMS 3.1 related resources are grouped under a single
//! `ddms:relatedResources` element carrying the relationship and direction.
//! From 4.0.1 each `ddms:relatedResource` stands alone and carries them itself.

use crate::attributes::SecurityAttributes;
use crate::engine::{
    Builder, BuilderList, Component, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;

pub const DIRECTIONS: [&str; 3] = ["outbound", "inbound", "bidirectional"];

const LOCATOR: &str = "locator";

/// An XLink locator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Link {
    version: DdmsVersion,
    href: String,
    role: Option<String>,
    title: Option<String>,
    label: Option<String>,
    warnings: Warnings,
}

impl Link {
    /// `xlink:type` is always `locator`.
    pub fn new(
        version: DdmsVersion,
        href: &str,
        role: Option<&str>,
        title: Option<&str>,
        label: Option<&str>,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            Some(LOCATOR.to_string()),
            href.to_string(),
            role.map(str::to_string),
            title.map(str::to_string),
            label.map(str::to_string),
        )
    }

    fn validated(
        version: DdmsVersion,
        link_type: Option<String>,
        href: String,
        role: Option<String>,
        title: Option<String>,
        label: Option<String>,
    ) -> Result<Self, ValidationError> {
        let v = Validator::new(version, Namespace::Ddms, "link");
        let link_type = v.require_some(link_type, "type attribute")?;
        v.require_text(&href, "href attribute")?;
        if link_type != LOCATOR {
            return Err(v.fail("The type attribute must have a fixed value of locator."));
        }
        Ok(Self {
            version,
            href,
            role,
            title,
            label,
            warnings: v.finish(),
        })
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

impl Component for Link {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, "link")?;
        let xlink = |name: &str| source.attr(Namespace::Xlink, name);
        Self::validated(
            version,
            xlink("type"),
            xlink("href").unwrap_or_default(),
            xlink("role"),
            xlink("title"),
            xlink("label"),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "link"
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        Template::new(self.version, Namespace::Ddms, "link")
            .attribute(Namespace::Xlink, "type", LOCATOR)
            .attribute(Namespace::Xlink, "href", &self.href)
            .optional_attribute(Namespace::Xlink, "role", self.role.as_ref())
            .optional_attribute(Namespace::Xlink, "title", self.title.as_ref())
            .optional_attribute(Namespace::Xlink, "label", self.label.as_ref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkBuilder {
    pub href: Option<String>,
    pub role: Option<String>,
    pub title: Option<String>,
    pub label: Option<String>,
}

impl From<&Link> for LinkBuilder {
    fn from(link: &Link) -> Self {
        Self {
            href: Some(link.href.clone()),
            role: link.role.clone(),
            title: link.title.clone(),
            label: link.label.clone(),
        }
    }
}

impl Builder for LinkBuilder {
    type Target = Link;

    fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<Link>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        Link::validated(
            version,
            Some(LOCATOR.to_string()),
            self.href.clone().unwrap_or_default(),
            self.role.clone(),
            self.title.clone(),
            self.label.clone(),
        )
        .map(Some)
    }
}

pub(crate) fn resource_name(version: DdmsVersion) -> &'static str {
    if version.has(Feature::CapitalizedEntityNames) {
        "RelatedResource"
    } else {
        "relatedResource"
    }
}

/// How a related resource relates to this one. Only carried by the resource
/// itself from DDMS 4.0.1.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub relationship: Option<String>,
    pub direction: Option<String>,
}

impl Relationship {
    pub fn new(relationship: &str, direction: Option<&str>) -> Self {
        Self {
            relationship: Some(relationship.to_string()),
            direction: direction.map(str::to_string),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.relationship.is_none() && self.direction.is_none()
    }

    fn from_source(source: &Source) -> Self {
        Self {
            relationship: source.attr(Namespace::Ddms, "relationship"),
            direction: source.attr(Namespace::Ddms, "direction"),
        }
    }

    fn require(&self, v: &Validator) -> Result<(), ValidationError> {
        v.require_text(self.relationship.as_deref().unwrap_or_default(), "relationship attribute")?;
        if let Some(direction) = &self.direction {
            v.require_one_of(direction, &DIRECTIONS, "direction")?;
        }
        Ok(())
    }

    fn render(&self, template: Template) -> Template {
        template
            .optional_attribute(Namespace::Ddms, "relationship", self.relationship.as_ref())
            .optional_attribute(Namespace::Ddms, "direction", self.direction.as_ref())
    }
}

/// A resource related to this one, identified by a qualifier/value pair and
/// reachable through one or more links.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelatedResource {
    version: DdmsVersion,
    relationship: Relationship,
    qualifier: String,
    value: String,
    links: Vec<Link>,
    security: SecurityAttributes,
    warnings: Warnings,
}

impl RelatedResource {
    /// `relationship` is required from DDMS 4.0.1 and must be empty before it.
    /// The same goes for `security`.
    pub fn new(
        version: DdmsVersion,
        relationship: Relationship,
        qualifier: &str,
        value: &str,
        links: Vec<Link>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        Self::validated(
            version,
            relationship,
            qualifier.to_string(),
            value.to_string(),
            links,
            security,
        )
    }

    fn validated(
        version: DdmsVersion,
        relationship: Relationship,
        qualifier: String,
        value: String,
        links: Vec<Link>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, resource_name(version));
        v.require_text(&qualifier, "qualifier attribute")?;
        v.require_text(&value, "value attribute")?;
        if version.has(Feature::FlatRelatedResources) {
            relationship.require(&v)?;
        } else {
            if !relationship.is_empty() {
                v.require_since(DdmsVersion::V4_0_1, "relationship attribute")?;
            }
            if !security.is_empty() {
                v.require_since(DdmsVersion::V4_0_1, "security attributes")?;
            }
        }
        security.validate(&v)?;
        v.require_compatible(&links)?;
        v.require_at_least(links.len(), 1, "link")?;
        v.absorb_all(None, &links);
        Ok(Self {
            version,
            relationship,
            qualifier,
            value,
            links,
            security,
            warnings: v.finish(),
        })
    }

    pub fn relationship(&self) -> Option<&str> {
        self.relationship.relationship.as_deref()
    }

    pub fn direction(&self) -> Option<&str> {
        self.relationship.direction.as_deref()
    }

    pub fn qualifier(&self) -> &str {
        &self.qualifier
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for RelatedResource {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, resource_name(version))?;
        Self::validated(
            version,
            Relationship::from_source(&source),
            source.attr(Namespace::Ddms, "qualifier").unwrap_or_default(),
            source.attr(Namespace::Ddms, "value").unwrap_or_default(),
            source.components(Namespace::Ddms, "link")?,
            SecurityAttributes::from_source(&source),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        resource_name(self.version)
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let template = Template::new(self.version, Namespace::Ddms, resource_name(self.version));
        self.relationship
            .render(template)
            .attribute(Namespace::Ddms, "qualifier", &self.qualifier)
            .attribute(Namespace::Ddms, "value", &self.value)
            .security(&self.security)
            .children(&self.links)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedResourceBuilder {
    pub relationship: Relationship,
    pub qualifier: Option<String>,
    pub value: Option<String>,
    pub links: BuilderList<LinkBuilder>,
    pub security: SecurityAttributes,
}

impl From<&RelatedResource> for RelatedResourceBuilder {
    fn from(resource: &RelatedResource) -> Self {
        Self {
            relationship: resource.relationship.clone(),
            qualifier: Some(resource.qualifier.clone()),
            value: Some(resource.value.clone()),
            links: BuilderList::of(&resource.links),
            security: resource.security.clone(),
        }
    }
}

impl Builder for RelatedResourceBuilder {
    type Target = RelatedResource;

    fn is_empty(&self) -> bool {
        self.relationship.is_empty()
            && self.qualifier.is_none()
            && self.value.is_none()
            && self.links.is_empty()
            && self.security.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<RelatedResource>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        RelatedResource::validated(
            version,
            self.relationship.clone(),
            self.qualifier.clone().unwrap_or_default(),
            self.value.clone().unwrap_or_default(),
            self.links.commit_all(version)?,
            self.security.clone(),
        )
        .map(Some)
    }
}

/// The grouping element used up to DDMS 3.1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelatedResources {
    version: DdmsVersion,
    relationship: Relationship,
    resources: Vec<RelatedResource>,
    security: SecurityAttributes,
    warnings: Warnings,
}

impl RelatedResources {
    pub fn new(
        version: DdmsVersion,
        relationship: Relationship,
        resources: Vec<RelatedResource>,
        security: SecurityAttributes,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, "relatedResources");
        relationship.require(&v)?;
        security.validate(&v)?;
        v.require_until(DdmsVersion::V3_1, "relatedResources element")?;
        v.require_compatible(&resources)?;
        v.require_at_least(resources.len(), 1, "RelatedResource")?;
        v.absorb_all(None, &resources);
        Ok(Self {
            version,
            relationship,
            resources,
            security,
            warnings: v.finish(),
        })
    }

    pub fn relationship(&self) -> Option<&str> {
        self.relationship.relationship.as_deref()
    }

    pub fn direction(&self) -> Option<&str> {
        self.relationship.direction.as_deref()
    }

    pub fn resources(&self) -> &[RelatedResource] {
        &self.resources
    }

    pub fn security_attributes(&self) -> &SecurityAttributes {
        &self.security
    }
}

impl Component for RelatedResources {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let source = Source::open(version, element, Namespace::Ddms, "relatedResources")?;
        Self::new(
            version,
            Relationship::from_source(&source),
            source.components(Namespace::Ddms, resource_name(version))?,
            SecurityAttributes::from_source(&source),
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        "relatedResources"
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let template = Template::new(self.version, Namespace::Ddms, "relatedResources");
        self.relationship
            .render(template)
            .security(&self.security)
            .children(&self.resources)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RelatedResourcesBuilder {
    pub relationship: Relationship,
    pub resources: BuilderList<RelatedResourceBuilder>,
    pub security: SecurityAttributes,
}

impl From<&RelatedResources> for RelatedResourcesBuilder {
    fn from(group: &RelatedResources) -> Self {
        Self {
            relationship: group.relationship.clone(),
            resources: BuilderList::of(&group.resources),
            security: group.security.clone(),
        }
    }
}

impl Builder for RelatedResourcesBuilder {
    type Target = RelatedResources;

    fn is_empty(&self) -> bool {
        self.relationship.is_empty() && self.resources.is_empty() && self.security.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<RelatedResources>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        RelatedResources::new(
            version,
            self.relationship.clone(),
            self.resources.commit_all(version)?,
            self.security.clone(),
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HREF: &str = "http://en.wikipedia.org/wiki/Tank";

    fn link(version: DdmsVersion) -> Link {
        Link::new(version, HREF, Some("tank"), Some("Tank Page"), Some("tank"))
            .unwrap()
    }

    #[test]
    fn test_link_type_is_fixed() {
        let xml = r#"<ddms:link xmlns:ddms="urn:us:mil:ces:metadata:ddms:4"
            xmlns:xlink="http://www.w3.org/1999/xlink"
            xlink:type="simple" xlink:href="http://en.wikipedia.org/wiki/Tank"/>"#;
        let err = Link::from_xml(DdmsVersion::V4_1, xml).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:link: The type attribute must have a fixed value of locator."
        );

        let link = link(DdmsVersion::V4_1);
        let element = link.to_element();
        assert_eq!(element.attributes[0].name.lexical(), "xlink:type");
        assert_eq!(element.attributes[0].value, "locator");
        assert_eq!(LinkBuilder::from(&link).commit(DdmsVersion::V4_1), Ok(Some(link)));
    }

    #[test]
    fn test_flat_related_resource_needs_relationship() {
        let err = RelatedResource::new(
            DdmsVersion::V4_1,
            Relationship::default(),
            "http://purl.org/dc/terms/URI",
            "http://en.wikipedia.org/wiki/Tank",
            vec![link(DdmsVersion::V4_1)],
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(err.message(), "relationship attribute is required.");

        let err = RelatedResource::new(
            DdmsVersion::V4_1,
            Relationship::new("http://purl.org/dc/terms/references", Some("sideways")),
            "http://purl.org/dc/terms/URI",
            "http://en.wikipedia.org/wiki/Tank",
            vec![link(DdmsVersion::V4_1)],
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "The direction must be one of outbound, inbound, bidirectional."
        );
    }

    #[test]
    fn test_flat_related_resource_output() {
        let xml = r#"<ddms:relatedResource xmlns:ddms="urn:us:mil:ces:metadata:ddms:4"
            xmlns:xlink="http://www.w3.org/1999/xlink"
            ddms:relationship="http://purl.org/dc/terms/references" ddms:direction="outbound"
            ddms:qualifier="http://purl.org/dc/terms/URI" ddms:value="http://en.wikipedia.org/wiki/Tank">
            <ddms:link xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Tank"
                xlink:role="tank" xlink:title="Tank Page" xlink:label="tank"/>
        </ddms:relatedResource>"#;
        let resource = RelatedResource::from_xml(DdmsVersion::V4_1, xml).unwrap();
        assert_eq!(resource.direction(), Some("outbound"));
        assert_eq!(
            resource.to_text(),
            "relatedResource.relationship: http://purl.org/dc/terms/references\n\
             relatedResource.direction: outbound\n\
             relatedResource.qualifier: http://purl.org/dc/terms/URI\n\
             relatedResource.value: http://en.wikipedia.org/wiki/Tank\n\
             relatedResource.link.type: locator\n\
             relatedResource.link.href: http://en.wikipedia.org/wiki/Tank\n\
             relatedResource.link.role: tank\n\
             relatedResource.link.title: Tank Page\n\
             relatedResource.link.label: tank\n"
        );
        assert_eq!(
            RelatedResourceBuilder::from(&resource).commit(DdmsVersion::V4_1),
            Ok(Some(resource))
        );
    }

    #[test]
    fn test_grouped_related_resources() {
        let xml = r#"<ddms:relatedResources xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.0/"
            xmlns:xlink="http://www.w3.org/1999/xlink"
            ddms:relationship="http://purl.org/dc/terms/references" ddms:direction="outbound">
            <ddms:RelatedResource ddms:qualifier="http://purl.org/dc/terms/URI"
                ddms:value="http://en.wikipedia.org/wiki/Tank">
                <ddms:link xlink:type="locator" xlink:href="http://en.wikipedia.org/wiki/Tank"/>
            </ddms:RelatedResource>
        </ddms:relatedResources>"#;
        let group = RelatedResources::from_xml(DdmsVersion::V3_0, xml).unwrap();
        assert_eq!(group.resources().len(), 1);
        assert_eq!(group.resources()[0].relationship(), None);
        assert_eq!(
            RelatedResourcesBuilder::from(&group).commit(DdmsVersion::V3_0),
            Ok(Some(group))
        );
    }

    #[test]
    fn test_grouping_is_gone_in_4_0_1() {
        let resource = RelatedResource::new(
            DdmsVersion::V4_0_1,
            Relationship::new("http://purl.org/dc/terms/references", None),
            "http://purl.org/dc/terms/URI",
            "http://en.wikipedia.org/wiki/Tank",
            vec![link(DdmsVersion::V4_0_1)],
            SecurityAttributes::default(),
        )
        .unwrap();
        let err = RelatedResources::new(
            DdmsVersion::V4_0_1,
            Relationship::new("http://purl.org/dc/terms/references", None),
            vec![resource],
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "The relatedResources element can only be used in DDMS 3.1 or earlier."
        );
    }

    #[test]
    fn test_grouped_resource_rejects_own_relationship() {
        let err = RelatedResource::new(
            DdmsVersion::V3_1,
            Relationship::new("http://purl.org/dc/terms/references", None),
            "http://purl.org/dc/terms/URI",
            "http://en.wikipedia.org/wiki/Tank",
            vec![link(DdmsVersion::V3_1)],
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(
            err.message(),
            "The relationship attribute cannot be used until DDMS 4.0.1 or later."
        );
        let err = RelatedResource::new(
            DdmsVersion::V3_1,
            Relationship::default(),
            "http://purl.org/dc/terms/URI",
            "http://en.wikipedia.org/wiki/Tank",
            Vec::new(),
            SecurityAttributes::default(),
        )
        .unwrap_err();
        assert_eq!(err.message(), "At least 1 link must exist.");
    }
}
