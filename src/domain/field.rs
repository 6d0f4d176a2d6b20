// ============================================================
// FIELD DESCRIPTORS
// ============================================================
// Per-column metadata in the shape the renderer expects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value-domain classification of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Temporal,
    Nominal,
    Ordinal,
    Quantitative,
}

/// Role of a column in a visualization: grouping key or aggregated number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticType {
    Dimension,
    Measure,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SemanticType::Temporal => "temporal",
            SemanticType::Nominal => "nominal",
            SemanticType::Ordinal => "ordinal",
            SemanticType::Quantitative => "quantitative",
        };
        write!(f, "{}", s)
    }
}

impl fmt::Display for AnalyticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalyticType::Dimension => "dimension",
            AnalyticType::Measure => "measure",
        };
        write!(f, "{}", s)
    }
}

/// One column's metadata.
///
/// Wire keys (`fid`, `name`, `semanticType`, `analyticType`) are fixed by
/// the renderer's input contract. `fid` is unique within a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub fid: String,

    /// Human-readable display name shown in the field list
    pub name: String,

    pub semantic_type: SemanticType,

    pub analytic_type: AnalyticType,
}

impl FieldDescriptor {
    pub fn new(
        fid: impl Into<String>,
        name: impl Into<String>,
        semantic_type: SemanticType,
        analytic_type: AnalyticType,
    ) -> Self {
        Self {
            fid: fid.into(),
            name: name.into(),
            semantic_type,
            analytic_type,
        }
    }
}
