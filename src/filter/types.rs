#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Eq,
    /// Substring match, `LIKE '%value%'` with wildcards in the value escaped
    Contains,
}

/// One predicate of a conjunctive WHERE clause.
///
/// Several columns means the predicate matches when any of them does
/// (`a LIKE $1 OR b LIKE $1`), all sharing a single bound parameter.
#[derive(Debug, Clone)]
pub struct FilterWhereInfo {
    pub columns: Vec<String>,
    pub operator: FilterOp,
    pub data: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<String>,
}
