//! Tabular model input
//!
//! [`ModelTables`] is the array form a front end hands to the solver: node
//! coordinates, element connectivity, element properties, supports and loads.
//! [`RawTables`] holds the same tables as text cells straight from a form and
//! converts them with strict parsing, so the solver only ever sees typed data.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::elements::{Element, Node, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::NodeLoad;
use crate::model::FrameModel;

/// Typed model tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelTables {
    /// Node coordinates [x, y]
    pub nodes: Vec<[f64; 2]>,
    /// Element connectivity [start node, end node], 1-based
    pub elements: Vec<[usize; 2]>,
    /// Element properties [A, I, E], one row per element
    pub properties: Vec<[f64; 3]>,
    /// Supports [node, restrain x, restrain y, restrain rotation], flags 0 or 1
    #[serde(default)]
    pub supports: Vec<[usize; 4]>,
    /// Loads [node, Fx, Fy, Mz]
    #[serde(default)]
    pub loads: Vec<[f64; 4]>,
}

impl ModelTables {
    /// Read tables from a JSON document
    pub fn from_json(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the tables and build a model
    pub fn to_model(&self) -> FrameResult<FrameModel> {
        if self.elements.len() != self.properties.len() {
            return Err(FrameError::InvalidInput(format!(
                "{} element rows but {} property rows",
                self.elements.len(),
                self.properties.len()
            )));
        }

        let mut model = FrameModel::new();

        for coords in &self.nodes {
            model.add_node(Node::from(*coords))?;
        }

        for ([start, end], [a, i, e]) in self.elements.iter().zip(&self.properties) {
            model.add_element(Element::new(*start, *end, *a, *i, *e))?;
        }

        for (row, [node, rx, ry, rz]) in self.supports.iter().enumerate() {
            let flag = |value: usize| match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(FrameError::InvalidInput(format!(
                    "support row {} has restraint flag {}, expected 0 or 1",
                    row + 1,
                    other
                ))),
            };
            let support = Support::from([flag(*rx)?, flag(*ry)?, flag(*rz)?]);
            model.add_support(*node, support)?;
        }

        for (row, [node, fx, fy, mz]) in self.loads.iter().enumerate() {
            let node = node_id(*node).ok_or_else(|| {
                FrameError::InvalidInput(format!(
                    "load row {} has node id {}, expected a positive integer",
                    row + 1,
                    node
                ))
            })?;
            model.add_node_load(node, NodeLoad::new(*fx, *fy, *mz))?;
        }

        model.validate()?;
        Ok(model)
    }
}

fn node_id(value: f64) -> Option<usize> {
    (value.is_finite() && value >= 1.0 && value.fract() == 0.0).then(|| value as usize)
}

/// Raw text cells, one `Vec<String>` per table row.
///
/// Column layouts:
/// - nodes: `x, y`
/// - elements: `start, end, A, I, E`
/// - supports: `node, x, y, rotation` (flags: `1/0`, `true/false`, `x` or empty)
/// - loads: `node, Fx, Fy, Mz`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTables {
    pub nodes: Vec<Vec<String>>,
    pub elements: Vec<Vec<String>>,
    #[serde(default)]
    pub supports: Vec<Vec<String>>,
    #[serde(default)]
    pub loads: Vec<Vec<String>>,
}

impl RawTables {
    /// Convert every cell, failing on the first one that does not parse
    pub fn parse(&self) -> FrameResult<ModelTables> {
        let nodes = parse_rows("node", &self.nodes, |row| Ok([row.float(0)?, row.float(1)?]))?;

        let mut elements = Vec::with_capacity(self.elements.len());
        let mut properties = Vec::with_capacity(self.elements.len());
        for (index, cells) in self.elements.iter().enumerate() {
            let row = Row::new("element", index, cells);
            elements.push([row.id(0)?, row.id(1)?]);
            properties.push([row.float(2)?, row.float(3)?, row.float(4)?]);
        }

        let supports = parse_rows("support", &self.supports, |row| {
            let flag = |column| row.flag(column).map(usize::from);
            Ok([row.id(0)?, flag(1)?, flag(2)?, flag(3)?])
        })?;

        let loads = parse_rows("load", &self.loads, |row| {
            Ok([row.id(0)? as f64, row.float(1)?, row.float(2)?, row.float(3)?])
        })?;

        Ok(ModelTables {
            nodes,
            elements,
            properties,
            supports,
            loads,
        })
    }

    /// Parse the tables and build a model
    pub fn to_model(&self) -> FrameResult<FrameModel> {
        self.parse()?.to_model()
    }
}

fn parse_rows<T>(
    table: &'static str,
    rows: &[Vec<String>],
    parse: impl Fn(&Row) -> FrameResult<T>,
) -> FrameResult<Vec<T>> {
    rows.iter()
        .enumerate()
        .map(|(index, cells)| parse(&Row::new(table, index, cells)))
        .collect()
}

/// One row of raw cells with its position for error reporting
struct Row<'a> {
    table: &'static str,
    index: usize,
    cells: &'a [String],
}

impl<'a> Row<'a> {
    fn new(table: &'static str, index: usize, cells: &'a [String]) -> Self {
        Self { table, index, cells }
    }

    fn error(&self, column: usize, message: impl Into<String>) -> FrameError {
        FrameError::Parse {
            table: self.table,
            row: self.index + 1,
            column: column + 1,
            message: message.into(),
        }
    }

    fn cell(&self, column: usize) -> FrameResult<&str> {
        match self.cells.get(column).map(|cell| cell.trim()) {
            Some(text) if !text.is_empty() => Ok(text),
            _ => Err(self.error(column, "missing value")),
        }
    }

    fn parsed<T: FromStr>(&self, column: usize, what: &str) -> FrameResult<T> {
        let text = self.cell(column)?;
        text.parse()
            .map_err(|_| self.error(column, format!("'{}' is not {}", text, what)))
    }

    fn float(&self, column: usize) -> FrameResult<f64> {
        let value: f64 = self.parsed(column, "a number")?;
        if !value.is_finite() {
            return Err(self.error(column, "value must be finite"));
        }
        Ok(value)
    }

    fn id(&self, column: usize) -> FrameResult<usize> {
        let value: usize = self.parsed(column, "a node id")?;
        if value == 0 {
            return Err(self.error(column, "node ids start at 1"));
        }
        Ok(value)
    }

    fn flag(&self, column: usize) -> FrameResult<bool> {
        let text = self.cells.get(column).map(|cell| cell.trim()).unwrap_or("");
        match text.to_ascii_lowercase().as_str() {
            "" | "0" | "false" => Ok(false),
            "1" | "x" | "true" => Ok(true),
            _ => Err(self.error(column, format!("'{}' is not a restraint flag", text))),
        }
    }
}
