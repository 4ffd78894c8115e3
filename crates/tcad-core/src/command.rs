//! Prompt to command

use serde::{Deserialize, Serialize};

use crate::grammar::{PromptError, RawDimension, ShapeMatch, Template, match_shape, normalize};
use crate::primitive::{Primitive, Shape};
use crate::units::to_millimeters;

/// Unit assumed when a template lets the unit be omitted
const DEFAULT_UNIT: &str = "mm";

/// Monotonic primitive id counter, shared across kinds.
///
/// Ids look like `box-1`, `sphere-2`. The counter only advances when a
/// primitive is actually built, so a rejected prompt leaves it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter that hands out `next` first
    pub fn starting_at(next: u64) -> Self {
        Self { next: next.max(1) }
    }

    /// Counter value the next id will use
    pub fn peek(&self) -> u64 {
        self.next
    }

    /// Build a primitive with the next id; the counter advances only on success
    pub fn issue(&mut self, shape: Shape) -> Result<Primitive, PromptError> {
        let next = self.next.checked_add(1).ok_or(PromptError::IdsExhausted)?;
        let id = format!("{}-{}", shape.kind().id_prefix(), self.next);
        let primitive = Primitive::new(id, shape)?;
        self.next = next;
        Ok(primitive)
    }

    /// Restart numbering at 1
    pub fn reset(&mut self) {
        self.next = 1;
    }
}

/// One user action
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the whole model with one primitive
    Create(Primitive),
    /// Append a primitive to the model
    Add(Primitive),
    /// Empty the model
    Clear,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Create(_) => "create",
            Command::Add(_) => "add",
            Command::Clear => "clear",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Create,
    Add,
}

/// Parse one prompt line into a command.
///
/// Accepted forms: `clear`, `create <shape>`, `add <shape>`, or a bare
/// `<shape>` which is treated as `create <shape>`.
pub fn parse_command(text: &str, ids: &mut IdGenerator) -> Result<Command, PromptError> {
    let line = normalize(text);
    if line.is_empty() {
        return Err(PromptError::EmptyPrompt);
    }
    if line == "clear" {
        return Ok(Command::Clear);
    }

    match split_verb(&line) {
        Some((verb, rest)) => {
            let shape = match_shape(rest)?
                .ok_or_else(|| PromptError::UnsupportedShape(rest.to_string()))?;
            let primitive = build_primitive(&shape, ids)?;
            Ok(match verb {
                Verb::Create => Command::Create(primitive),
                Verb::Add => Command::Add(primitive),
            })
        }
        None => {
            let shape =
                match_shape(&line)?.ok_or_else(|| PromptError::UnsupportedCommand(line.clone()))?;
            Ok(Command::Create(build_primitive(&shape, ids)?))
        }
    }
}

fn split_verb(line: &str) -> Option<(Verb, &str)> {
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .unwrap_or((line, ""));
    let verb = match head {
        "create" => Verb::Create,
        "add" => Verb::Add,
        _ => return None,
    };
    Some((verb, rest.trim()))
}

fn resolve_dimension(raw: &RawDimension) -> Result<f64, PromptError> {
    let value: f64 = raw
        .number
        .parse()
        .map_err(|_| PromptError::InvalidDimension(f64::NAN))?;
    to_millimeters(value, raw.unit.as_deref().unwrap_or(DEFAULT_UNIT))
}

fn build_primitive(m: &ShapeMatch, ids: &mut IdGenerator) -> Result<Primitive, PromptError> {
    let dims = m
        .dimensions
        .iter()
        .map(resolve_dimension)
        .collect::<Result<Vec<_>, _>>()?;

    let shape = match (m.template, dims.as_slice()) {
        (Template::SharedUnitBox | Template::BoxBy, &[width_mm, depth_mm, height_mm]) => {
            Shape::Box {
                width_mm,
                depth_mm,
                height_mm,
            }
        }
        (Template::Cube, &[side]) => Shape::cube(side),
        (Template::Cylinder, &[radius_mm, height_mm]) => Shape::Cylinder {
            radius_mm,
            height_mm,
        },
        (Template::Sphere, &[radius_mm]) => Shape::Sphere { radius_mm },
        (template, _) => {
            return Err(PromptError::MissingDimension {
                shape: template.kind(),
                requirement: "a complete set of dimensions",
            });
        }
    };

    let primitive = ids.issue(shape)?;
    tracing::debug!(id = primitive.id(), kind = %primitive.kind(), "Built primitive");
    Ok(primitive)
}
