//! Semantic model types - explores, tables, fields, filters, metric queries.

pub mod explore;
pub mod field;
pub mod filter;
pub mod metric_query;
pub mod table;
pub mod types;

pub use explore::{Explore, ExploreJoin};
pub use field::{Dimension, Field, FieldId, Measure};
pub use filter::{
    filterable_dimensions, FilterGroup, FilterGroupOperator, FilterableDimension, FilterableType,
    NumberFilter, NumberFilterGroup, StringFilter, StringFilterGroup,
};
pub use metric_query::{MetricQuery, SortDirection, SortField};
pub use table::Table;
pub use types::{DimensionType, MeasureType};
