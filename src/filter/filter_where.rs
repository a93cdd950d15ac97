use super::error::FilterError;
use super::types::{FilterOp, FilterWhereInfo};

/// Builds a parameterized, conjunctive WHERE clause.
///
/// Every predicate is ANDed; values are always bound as `$n` parameters,
/// column names are validated and quoted.
#[derive(Debug, Clone, Default)]
pub struct FilterWhere {
    param_values: Vec<String>,
    param_index: usize,
    conditions: Vec<FilterWhereInfo>,
}

impl FilterWhere {
    pub fn new() -> Self {
        Self::default()
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl Into<String>) -> Result<Self, FilterError> {
        validate_column(column)?;
        self.conditions.push(FilterWhereInfo {
            columns: vec![column.to_string()],
            operator: FilterOp::Eq,
            data: value.into(),
        });
        Ok(self)
    }

    /// `column LIKE '%value%'`
    pub fn contains(self, column: &str, value: impl Into<String>) -> Result<Self, FilterError> {
        self.contains_any(&[column], value)
    }

    /// `(a LIKE '%value%' OR b LIKE '%value%' ...)`
    pub fn contains_any(mut self, columns: &[&str], value: impl Into<String>) -> Result<Self, FilterError> {
        if columns.is_empty() {
            return Err(FilterError::InvalidOperatorData(
                "substring filter requires at least one column".to_string(),
            ));
        }
        for column in columns {
            validate_column(column)?;
        }
        self.conditions.push(FilterWhereInfo {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            operator: FilterOp::Contains,
            data: value.into(),
        });
        Ok(self)
    }

    /// Render the clause (without the `WHERE` keyword) and its parameters.
    /// Parameters are numbered from `$1`.
    pub fn build(&mut self) -> Result<(String, Vec<String>), FilterError> {
        self.param_values.clear();
        self.param_index = 0;

        let conditions = std::mem::take(&mut self.conditions);
        let mut sql_conditions = Vec::with_capacity(conditions.len());
        for condition in &conditions {
            sql_conditions.push(self.build_sql_condition(condition)?);
        }
        self.conditions = conditions;

        let where_clause = if sql_conditions.is_empty() {
            "1=1".to_string()
        } else {
            sql_conditions.join(" AND ")
        };
        Ok((where_clause, self.param_values.clone()))
    }

    fn build_sql_condition(&mut self, condition: &FilterWhereInfo) -> Result<String, FilterError> {
        match condition.operator {
            FilterOp::Eq => {
                let column = quote_identifier(&condition.columns[0])?;
                let param = self.param(condition.data.clone());
                Ok(format!("{} = {}", column, param))
            }
            FilterOp::Contains => {
                let param = self.param(format!("%{}%", escape_like(&condition.data)));
                let parts = condition
                    .columns
                    .iter()
                    .map(|c| quote_identifier(c).map(|q| format!("{} LIKE {}", q, param)))
                    .collect::<Result<Vec<_>, _>>()?;
                if parts.len() == 1 {
                    Ok(parts.into_iter().next().unwrap_or_default())
                } else {
                    Ok(format!("({})", parts.join(" OR ")))
                }
            }
        }
    }

    fn param(&mut self, value: String) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE wildcards so user input matches literally.
/// PostgreSQL uses backslash as the default LIKE escape character.
pub fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Quote a SQL identifier after checking it is a plain lowercase name
pub fn quote_identifier(name: &str) -> Result<String, FilterError> {
    validate_column(name)?;
    Ok(format!("\"{}\"", name))
}

fn validate_column(name: &str) -> Result<(), FilterError> {
    let valid = !name.is_empty()
        && name.chars().next().is_some_and(|c| c.is_ascii_lowercase() || c == '_')
        && name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(FilterError::InvalidColumn(name.to_string()))
    }
}
