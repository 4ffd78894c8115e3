//! Sentence templates for shape prompts
//!
//! A prompt line is matched against a fixed, ordered list of anchored
//! templates. The first template that matches wins; there is no scoring.
//! Lines that open with a shape keyword but fit none of that shape's
//! templates are rejected with a shape-specific message instead of falling
//! through to a generic "unsupported" error.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::constants::{MAX_DIMENSION_MM, MIN_DIMENSION_MM};
use crate::primitive::PrimitiveKind;

/// Decimal number: `2`, `2.5`, `.5`, with an optional sign so negative sizes
/// reach dimension validation instead of failing the template.
const NUMBER: &str = r"[-+]?(?:\d+(?:\.\d+)?|\.\d+)";

/// Any alphabetic word in a unit slot; the unit normalizer decides validity.
const UNIT: &str = r"[a-z]+";

/// Supported sentence templates, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Template {
    /// `<N> x <N> x <N> <UNIT> (box|cube)`
    SharedUnitBox,
    /// `box <N><UNIT> by <N><UNIT> by <N><UNIT>`
    BoxBy,
    /// `cube <N><UNIT>` or `<N> <UNIT> cube`
    Cube,
    /// `cylinder radius <N>[<UNIT>] height <N>[<UNIT>]`
    Cylinder,
    /// `sphere radius <N>[<UNIT>]`
    Sphere,
}

impl Template {
    /// Primitive kind produced by this template
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Template::SharedUnitBox | Template::BoxBy | Template::Cube => PrimitiveKind::Box,
            Template::Cylinder => PrimitiveKind::Cylinder,
            Template::Sphere => PrimitiveKind::Sphere,
        }
    }
}

/// A numeric capture and its unit token, both still raw text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDimension {
    pub number: String,
    /// `None` when the template allows the unit to be omitted
    pub unit: Option<String>,
}

/// Successful template match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeMatch {
    pub template: Template,
    /// Captures in template order (box: width, depth, height;
    /// cube: side; cylinder: radius, height; sphere: radius)
    pub dimensions: Vec<RawDimension>,
}

/// Named capture groups for one numeric slot
struct Slot {
    number: &'static str,
    unit: &'static str,
}

struct Pattern {
    template: Template,
    regex: Regex,
    slots: &'static [Slot],
}

impl Pattern {
    fn new(template: Template, body: &str, slots: &'static [Slot]) -> Self {
        let source = format!("^{}$", body.replace("{N}", NUMBER).replace("{U}", UNIT));
        Self {
            template,
            regex: Regex::new(&source).expect("template pattern is a valid regex"),
            slots,
        }
    }

    fn extract(&self, caps: &Captures<'_>) -> ShapeMatch {
        let dimensions = self
            .slots
            .iter()
            .map(|slot| RawDimension {
                number: caps
                    .name(slot.number)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                unit: caps.name(slot.unit).map(|m| m.as_str().to_string()),
            })
            .collect();
        ShapeMatch {
            template: self.template,
            dimensions,
        }
    }
}

static TEMPLATES: LazyLock<Vec<Pattern>> = LazyLock::new(|| {
    vec![
        Pattern::new(
            Template::SharedUnitBox,
            r"(?P<w>{N})\s*x\s*(?P<d>{N})\s*x\s*(?P<h>{N})\s*(?P<unit>{U})\s+(?:box|cube)",
            &[
                Slot { number: "w", unit: "unit" },
                Slot { number: "d", unit: "unit" },
                Slot { number: "h", unit: "unit" },
            ],
        ),
        Pattern::new(
            Template::BoxBy,
            r"box\s+(?P<w>{N})\s*(?P<wu>{U})\s+by\s+(?P<d>{N})\s*(?P<du>{U})\s+by\s+(?P<h>{N})\s*(?P<hu>{U})",
            &[
                Slot { number: "w", unit: "wu" },
                Slot { number: "d", unit: "du" },
                Slot { number: "h", unit: "hu" },
            ],
        ),
        Pattern::new(
            Template::Cube,
            r"cube\s+(?P<s>{N})\s*(?P<unit>{U})",
            &[Slot { number: "s", unit: "unit" }],
        ),
        Pattern::new(
            Template::Cube,
            r"(?P<s>{N})\s*(?P<unit>{U})\s+cube",
            &[Slot { number: "s", unit: "unit" }],
        ),
        Pattern::new(
            Template::Cylinder,
            r"cylinder\s+radius\s+(?P<r>{N})\s*(?P<ru>{U})?\s+height\s+(?P<h>{N})\s*(?P<hu>{U})?",
            &[
                Slot { number: "r", unit: "ru" },
                Slot { number: "h", unit: "hu" },
            ],
        ),
        Pattern::new(
            Template::Sphere,
            r"sphere\s+radius\s+(?P<r>{N})\s*(?P<ru>{U})?",
            &[Slot { number: "r", unit: "ru" }],
        ),
    ]
});

/// Trim and lower-case a prompt line
pub fn normalize(line: &str) -> String {
    line.trim().to_lowercase()
}

/// Match a line against the shape templates.
///
/// Returns `Ok(None)` when the line matches nothing and does not start with
/// a shape keyword. A line that starts with `box`, `cube`, `cylinder` or
/// `sphere` either matches or fails with [`PromptError::MissingDimension`].
pub fn match_shape(line: &str) -> Result<Option<ShapeMatch>, PromptError> {
    let line = normalize(line);

    for pattern in TEMPLATES.iter() {
        if let Some(caps) = pattern.regex.captures(&line) {
            tracing::debug!(template = ?pattern.template, line = %line, "Matched shape template");
            return Ok(Some(pattern.extract(&caps)));
        }
    }

    match committed_keyword(&line) {
        Some(keyword) => Err(keyword.missing_dimension()),
        None => Ok(None),
    }
}

/// Shape keyword that opens a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Box,
    Cube,
    Cylinder,
    Sphere,
}

impl Keyword {
    fn missing_dimension(self) -> PromptError {
        let (shape, requirement) = match self {
            Keyword::Box => (
                PrimitiveKind::Box,
                "3 dimensions, e.g. 'box 10mm by 20mm by 5mm'",
            ),
            Keyword::Cube => (
                PrimitiveKind::Box,
                "a side length with a unit, e.g. 'cube 20mm'",
            ),
            Keyword::Cylinder => (
                PrimitiveKind::Cylinder,
                "a radius and a height, e.g. 'cylinder radius 10mm height 20mm'",
            ),
            Keyword::Sphere => (
                PrimitiveKind::Sphere,
                "a radius, e.g. 'sphere radius 5mm'",
            ),
        };
        PromptError::MissingDimension { shape, requirement }
    }
}

fn committed_keyword(line: &str) -> Option<Keyword> {
    match line.split_whitespace().next()? {
        "box" => Some(Keyword::Box),
        "cube" => Some(Keyword::Cube),
        "cylinder" => Some(Keyword::Cylinder),
        "sphere" => Some(Keyword::Sphere),
        _ => None,
    }
}

/// Discriminant of [`PromptError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EmptyPrompt,
    UnsupportedCommand,
    UnsupportedShape,
    MissingDimension,
    UnknownUnit,
    InvalidDimension,
    IdsExhausted,
}

/// Errors raised while turning a prompt into a command
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PromptError {
    #[error("Prompt is empty")]
    EmptyPrompt,
    #[error("Unsupported command: '{0}' (expected clear, create <shape>, add <shape> or a shape)")]
    UnsupportedCommand(String),
    #[error("Unsupported shape: '{0}' (expected box, cube, cylinder or sphere)")]
    UnsupportedShape(String),
    #[error("{shape} requires {requirement}")]
    MissingDimension {
        shape: PrimitiveKind,
        requirement: &'static str,
    },
    #[error("Unknown unit '{0}' (expected mm, cm, in, inch or inches)")]
    UnknownUnit(String),
    #[error(
        "Invalid dimension {0}: sizes must be between {min} mm and {max} mm",
        min = MIN_DIMENSION_MM,
        max = MAX_DIMENSION_MM
    )]
    InvalidDimension(f64),
    #[error("No primitive ids left")]
    IdsExhausted,
}

impl PromptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PromptError::EmptyPrompt => ErrorKind::EmptyPrompt,
            PromptError::UnsupportedCommand(_) => ErrorKind::UnsupportedCommand,
            PromptError::UnsupportedShape(_) => ErrorKind::UnsupportedShape,
            PromptError::MissingDimension { .. } => ErrorKind::MissingDimension,
            PromptError::UnknownUnit(_) => ErrorKind::UnknownUnit,
            PromptError::InvalidDimension(_) => ErrorKind::InvalidDimension,
            PromptError::IdsExhausted => ErrorKind::IdsExhausted,
        }
    }
}
