//! Predicate construction for element queries.
//!
//! A [`Predicate`] is a compound text-match expression over one element
//! attribute: one [`Criterion`] per literal fragment, combined by a
//! [`Combinator`]. Predicates are built once, validated at construction, and
//! then applied to candidate collections, never mutated.
//!
//! # Design Philosophy
//!
//! - **Strict Construction**: empty criteria and malformed patterns are
//!   rejected before anything is queried, not silently no-opped
//! - **Short-Circuit Evaluation**: OR stops on the first hit, AND on the
//!   first miss
//! - **Narrowing Only**: applying a predicate to an already-filtered
//!   collection can only shrink it, enabling chained, progressively stricter
//!   queries

use regex::Regex;

use crate::element::ElementHandle;
use crate::result::{VerificarError, VerificarResult};

// =============================================================================
// FIELD, MODE, COMBINATOR
// =============================================================================

/// The element attribute a predicate matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchField {
    /// Visible label text
    Label,
    /// Current string value
    Value,
    /// Placeholder value
    PlaceholderValue,
    /// Accessibility identifier
    Identifier,
}

impl MatchField {
    /// Get the field name used in diagnostics
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Value => "value",
            Self::PlaceholderValue => "placeholderValue",
            Self::Identifier => "identifier",
        }
    }

    /// Read this attribute from an element, if present
    pub fn extract<H: ElementHandle + ?Sized>(&self, element: &H) -> Option<String> {
        match self {
            Self::Label => Some(element.label()),
            Self::Value => element.value(),
            Self::PlaceholderValue => element.placeholder_value(),
            Self::Identifier => Some(element.identifier()),
        }
    }
}

impl std::fmt::Display for MatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a criterion's text is tested against the attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchMode {
    /// Substring test
    Contains,
    /// Full-string pattern test (anchored regular expression)
    Matches,
}

/// How multiple criteria combine into one predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Combinator {
    /// Every criterion must match
    #[default]
    And,
    /// At least one criterion must match
    Or,
    /// The single criterion must not match
    Not,
}

// =============================================================================
// CRITERION
// =============================================================================

/// One literal match fragment: text, mode, and case sensitivity.
///
/// `Matches`-mode patterns are compiled once at construction; a pattern that
/// fails to compile is a construction error, never a silent non-match.
#[derive(Debug, Clone)]
pub struct Criterion {
    pattern: String,
    mode: MatchMode,
    case_sensitive: bool,
    compiled: Option<Regex>,
}

impl Criterion {
    fn new(pattern: String, mode: MatchMode, case_sensitive: bool) -> VerificarResult<Self> {
        let compiled = match mode {
            MatchMode::Contains => None,
            MatchMode::Matches => {
                let flags = if case_sensitive { "" } else { "(?i)" };
                // Anchored: a full-string match, not a search
                let anchored = format!("{flags}^(?:{pattern})$");
                Some(
                    Regex::new(&anchored).map_err(|e| VerificarError::InvalidPattern {
                        pattern: pattern.clone(),
                        message: e.to_string(),
                    })?,
                )
            }
        };
        Ok(Self {
            pattern,
            mode,
            case_sensitive,
            compiled,
        })
    }

    /// The literal text or pattern
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The match mode
    #[must_use]
    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    /// Whether the comparison is case-sensitive
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Test this criterion against an attribute value
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        match self.mode {
            MatchMode::Contains => {
                if self.case_sensitive {
                    value.contains(&self.pattern)
                } else {
                    value.to_lowercase().contains(&self.pattern.to_lowercase())
                }
            }
            MatchMode::Matches => self
                .compiled
                .as_ref()
                .is_some_and(|regex| regex.is_match(value)),
        }
    }
}

// =============================================================================
// PREDICATE
// =============================================================================

/// An immutable compound match expression over one element attribute.
///
/// # Example
///
/// ```
/// use verificar::{Combinator, MatchField, MatchMode, Predicate};
///
/// let predicate = Predicate::builder(MatchField::Label, MatchMode::Contains)
///     .texts(["Cancel", "Abort"])
///     .with_combinator(Combinator::Or)
///     .build()
///     .unwrap();
///
/// assert!(predicate.matches_text("Cancel Request"));
/// assert!(!predicate.matches_text("Dismiss"));
/// ```
#[derive(Debug, Clone)]
pub struct Predicate {
    field: MatchField,
    combinator: Combinator,
    criteria: Vec<Criterion>,
}

impl Predicate {
    /// Start building a predicate over `field` with `mode`
    #[must_use]
    pub fn builder(field: MatchField, mode: MatchMode) -> PredicateBuilder {
        PredicateBuilder::new(field, mode)
    }

    /// The attribute this predicate reads
    #[must_use]
    pub const fn field(&self) -> MatchField {
        self.field
    }

    /// The combinator joining the criteria
    #[must_use]
    pub const fn combinator(&self) -> Combinator {
        self.combinator
    }

    /// The criteria, in the order supplied
    #[must_use]
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Evaluate against a raw attribute value.
    ///
    /// OR returns true on the first satisfied criterion; AND returns false on
    /// the first failed one; NOT negates its single criterion.
    #[must_use]
    pub fn matches_text(&self, value: &str) -> bool {
        match self.combinator {
            Combinator::And => self.criteria.iter().all(|c| c.is_match(value)),
            Combinator::Or => self.criteria.iter().any(|c| c.is_match(value)),
            Combinator::Not => self.criteria.first().is_some_and(|c| !c.is_match(value)),
        }
    }

    /// Evaluate against an element. An absent attribute never matches.
    #[must_use]
    pub fn matches<H: ElementHandle + ?Sized>(&self, element: &H) -> bool {
        self.field
            .extract(element)
            .is_some_and(|value| self.matches_text(&value))
    }

    /// Narrow a candidate collection to the elements this predicate matches.
    ///
    /// Applying a predicate to an already-filtered collection narrows it
    /// further; it can never widen.
    pub fn filter<'a, H: ElementHandle>(
        &self,
        candidates: impl IntoIterator<Item = &'a H>,
    ) -> Vec<&'a H> {
        candidates
            .into_iter()
            .filter(|element| self.matches(*element))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Convenience constructors (AND, case-sensitive defaults)
    // -------------------------------------------------------------------------

    /// Label contains every given text
    pub fn label_contains<I, S>(texts: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::Label, MatchMode::Contains)
            .texts(texts)
            .build()
    }

    /// Label fully matches every given pattern
    pub fn label_matches<I, S>(patterns: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::Label, MatchMode::Matches)
            .texts(patterns)
            .build()
    }

    /// Value contains every given text
    pub fn value_contains<I, S>(texts: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::Value, MatchMode::Contains)
            .texts(texts)
            .build()
    }

    /// Value fully matches every given pattern
    pub fn value_matches<I, S>(patterns: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::Value, MatchMode::Matches)
            .texts(patterns)
            .build()
    }

    /// Placeholder value contains every given text
    pub fn placeholder_contains<I, S>(texts: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::PlaceholderValue, MatchMode::Contains)
            .texts(texts)
            .build()
    }

    /// Placeholder value fully matches every given pattern
    pub fn placeholder_matches<I, S>(patterns: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::PlaceholderValue, MatchMode::Matches)
            .texts(patterns)
            .build()
    }

    /// Identifier contains every given text
    pub fn identifier_contains<I, S>(texts: I) -> VerificarResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::builder(MatchField::Identifier, MatchMode::Contains)
            .texts(texts)
            .build()
    }
}

// =============================================================================
// BUILDER
// =============================================================================

/// Builder for [`Predicate`].
///
/// Defaults: [`Combinator::And`], case-sensitive. Case sensitivity applies
/// uniformly to every criterion in the build; mixed sensitivity within one
/// predicate is not supported.
#[derive(Debug, Clone)]
pub struct PredicateBuilder {
    field: MatchField,
    mode: MatchMode,
    texts: Vec<String>,
    combinator: Combinator,
    case_sensitive: bool,
}

impl PredicateBuilder {
    /// Create a new builder over `field` with `mode`
    #[must_use]
    pub const fn new(field: MatchField, mode: MatchMode) -> Self {
        Self {
            field,
            mode,
            texts: Vec::new(),
            combinator: Combinator::And,
            case_sensitive: true,
        }
    }

    /// Add one criterion text
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.texts.push(text.into());
        self
    }

    /// Add criterion texts in order
    #[must_use]
    pub fn texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts.extend(texts.into_iter().map(Into::into));
        self
    }

    /// Set the combinator
    #[must_use]
    pub const fn with_combinator(mut self, combinator: Combinator) -> Self {
        self.combinator = combinator;
        self
    }

    /// Set case sensitivity for every criterion in this build
    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Build the predicate.
    ///
    /// # Errors
    ///
    /// - [`VerificarError::EmptyCriteria`] when no texts were supplied
    /// - [`VerificarError::NegationArity`] when NOT is combined with more
    ///   than one criterion
    /// - [`VerificarError::InvalidPattern`] when a matches-mode pattern does
    ///   not compile
    pub fn build(self) -> VerificarResult<Predicate> {
        if self.texts.is_empty() {
            return Err(VerificarError::EmptyCriteria);
        }
        if self.combinator == Combinator::Not && self.texts.len() > 1 {
            return Err(VerificarError::NegationArity {
                count: self.texts.len(),
            });
        }

        let criteria = self
            .texts
            .into_iter()
            .map(|text| Criterion::new(text, self.mode, self.case_sensitive))
            .collect::<VerificarResult<Vec<_>>>()?;

        Ok(Predicate {
            field: self.field,
            combinator: self.combinator,
            criteria,
        })
    }
}
