// crates/ddms-rs/src/subject/coverage.rs

use super::actors::{NonStateActor, NonStateActorBuilder, ProductionMetric, ProductionMetricBuilder};
use super::terms::{Category, CategoryBuilder, Keyword, KeywordBuilder};
use crate::engine::{
    Builder, BuilderList, Component, Source, Template, ValidationWarning, Validator, Warnings,
};
use crate::error::ValidationError;
use crate::version::{DdmsVersion, Feature, Namespace};
use crate::xml::Element;
use std::collections::HashSet;

const NAME: &str = "subjectCoverage";
const WRAPPER: &str = "Subject";

/// The topic of the resource.
///
/// Before DDMS 4.0.1 the keywords and categories sit inside a `ddms:Subject`
/// wrapper; from 4.0.1 they are direct children, joined by production metrics
/// and non-state actors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubjectCoverage {
    version: DdmsVersion,
    keywords: Vec<Keyword>,
    categories: Vec<Category>,
    production_metrics: Vec<ProductionMetric>,
    non_state_actors: Vec<NonStateActor>,
    warnings: Warnings,
}

impl SubjectCoverage {
    pub fn new(
        version: DdmsVersion,
        keywords: Vec<Keyword>,
        categories: Vec<Category>,
        production_metrics: Vec<ProductionMetric>,
        non_state_actors: Vec<NonStateActor>,
    ) -> Result<Self, ValidationError> {
        let mut v = Validator::new(version, Namespace::Ddms, NAME);
        v.require_compatible(&keywords)?;
        v.require_compatible(&categories)?;
        v.require_compatible(&production_metrics)?;
        v.require_compatible(&non_state_actors)?;
        if keywords.is_empty() && categories.is_empty() {
            return Err(v.fail("At least 1 keyword or category must exist."));
        }

        let wrapper = wrapper_name(version);
        v.absorb_all(wrapper.as_deref(), &keywords);
        v.absorb_all(wrapper.as_deref(), &categories);
        v.absorb_all(wrapper.as_deref(), &production_metrics);
        v.absorb_all(wrapper.as_deref(), &non_state_actors);

        let mut seen = HashSet::new();
        if !keywords.iter().all(|k| seen.insert(k.value())) {
            v.warn("1 or more keywords have the same value.");
        }
        let mut seen = HashSet::new();
        if !categories.iter().all(|c| seen.insert((c.qualifier(), c.code(), c.label()))) {
            v.warn("1 or more categories have the same value.");
        }

        Ok(Self {
            version,
            keywords,
            categories,
            production_metrics,
            non_state_actors,
            warnings: v.finish(),
        })
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn production_metrics(&self) -> &[ProductionMetric] {
        &self.production_metrics
    }

    pub fn non_state_actors(&self) -> &[NonStateActor] {
        &self.non_state_actors
    }
}

/// Qualified name of the wrapper element, for revisions that have one.
fn wrapper_name(version: DdmsVersion) -> Option<String> {
    version
        .has(Feature::CoverageWrappers)
        .then(|| version.qualified(Namespace::Ddms, WRAPPER))
}

impl Component for SubjectCoverage {
    fn from_element(version: DdmsVersion, element: &Element) -> Result<Self, ValidationError> {
        let outer = Source::open(version, element, Namespace::Ddms, NAME)?;
        let source = if version.has(Feature::CoverageWrappers) {
            outer.wrapper(Namespace::Ddms, WRAPPER)?
        } else {
            outer
        };
        Self::new(
            version,
            source.components(Namespace::Ddms, "keyword")?,
            source.components(Namespace::Ddms, "category")?,
            source.components(Namespace::Ddms, "productionMetric")?,
            source.components(Namespace::Ddms, "nonStateActor")?,
        )
    }

    fn version(&self) -> DdmsVersion {
        self.version
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    fn template(&self) -> Template {
        let content = |template: Template| {
            template
                .children(&self.keywords)
                .children(&self.categories)
                .children(&self.production_metrics)
                .children(&self.non_state_actors)
        };
        let template = Template::new(self.version, Namespace::Ddms, NAME);
        if self.version.has(Feature::CoverageWrappers) {
            template.wrapper(Namespace::Ddms, WRAPPER, content)
        } else {
            content(template)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectCoverageBuilder {
    pub keywords: BuilderList<KeywordBuilder>,
    pub categories: BuilderList<CategoryBuilder>,
    pub production_metrics: BuilderList<ProductionMetricBuilder>,
    pub non_state_actors: BuilderList<NonStateActorBuilder>,
}

impl From<&SubjectCoverage> for SubjectCoverageBuilder {
    fn from(coverage: &SubjectCoverage) -> Self {
        Self {
            keywords: BuilderList::of(&coverage.keywords),
            categories: BuilderList::of(&coverage.categories),
            production_metrics: BuilderList::of(&coverage.production_metrics),
            non_state_actors: BuilderList::of(&coverage.non_state_actors),
        }
    }
}

impl Builder for SubjectCoverageBuilder {
    type Target = SubjectCoverage;

    fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.categories.is_empty()
            && self.production_metrics.is_empty()
            && self.non_state_actors.is_empty()
    }

    fn commit(&self, version: DdmsVersion) -> Result<Option<SubjectCoverage>, ValidationError> {
        if self.is_empty() {
            return Ok(None);
        }
        SubjectCoverage::new(
            version,
            self.keywords.commit_all(version)?,
            self.categories.commit_all(version)?,
            self.production_metrics.commit_all(version)?,
            self.non_state_actors.commit_all(version)?,
        )
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::SecurityAttributes;

    fn keywords(version: DdmsVersion, values: &[&str]) -> Vec<Keyword> {
        values.iter().map(|v| Keyword::new(version, v).unwrap()).collect()
    }

    #[test]
    fn test_requires_keyword_or_category() {
        let err = SubjectCoverage::new(DdmsVersion::V4_1, vec![], vec![], vec![], vec![]).unwrap_err();
        assert_eq!(err.message(), "At least 1 keyword or category must exist.");
    }

    #[test]
    fn test_duplicate_keywords_warn() {
        let coverage = SubjectCoverage::new(
            DdmsVersion::V4_1,
            keywords(DdmsVersion::V4_1, &["Tornado", "Tornado"]),
            vec![],
            vec![],
            vec![],
        )
        .unwrap();
        assert_eq!(coverage.warnings().len(), 1);
        assert_eq!(coverage.warnings()[0].message(), "1 or more keywords have the same value.");
    }

    #[test]
    fn test_child_warnings_are_relocated() {
        let actor = NonStateActor::new(DdmsVersion::V4_1, "", None, None, SecurityAttributes::default()).unwrap();
        let coverage = SubjectCoverage::new(
            DdmsVersion::V4_1,
            keywords(DdmsVersion::V4_1, &["Tornado"]),
            vec![],
            vec![],
            vec![actor],
        )
        .unwrap();
        assert_eq!(
            coverage.warnings()[0].locator(),
            "ddms:subjectCoverage/ddms:nonStateActor"
        );
    }

    #[test]
    fn test_wrapper_before_4_0_1() {
        let xml = r#"<ddms:subjectCoverage xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.1/">
            <ddms:Subject>
                <ddms:keyword ddms:value="Tornado"/>
                <ddms:category ddms:label="Weather"/>
            </ddms:Subject>
        </ddms:subjectCoverage>"#;
        let coverage = SubjectCoverage::from_xml(DdmsVersion::V3_1, xml).unwrap();
        assert_eq!(coverage.keywords().len(), 1);
        assert_eq!(
            coverage.to_text(),
            "subjectCoverage.keyword.value: Tornado\nsubjectCoverage.category.label: Weather\n"
        );
        let element = coverage.to_element();
        assert_eq!(element.children[0].name.local, "Subject");
        assert_eq!(
            SubjectCoverageBuilder::from(&coverage).commit(DdmsVersion::V3_1),
            Ok(Some(coverage))
        );

        let err = SubjectCoverage::from_xml(
            DdmsVersion::V3_1,
            r#"<ddms:subjectCoverage xmlns:ddms="http://metadata.dod.mil/mdr/ns/DDMS/3.1/">
                <ddms:Subject><ddms:keyword/></ddms:Subject>
            </ddms:subjectCoverage>"#,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "ddms:subjectCoverage/ddms:Subject/ddms:keyword: value attribute is required."
        );
    }

    #[test]
    fn test_builder_skips_empty_entries() {
        let mut builder = SubjectCoverageBuilder::default();
        builder.keywords.slot(1).value = Some("Tornado".to_string());
        assert_eq!(builder.keywords.len(), 2);
        let coverage = builder.commit(DdmsVersion::V4_0_1).unwrap().unwrap();
        assert_eq!(coverage.keywords().len(), 1);
        assert_eq!(coverage.keywords()[0].value(), "Tornado");
    }
}
