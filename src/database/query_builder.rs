use sqlx::{self, postgres::PgRow, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{quote_identifier, FilterError, FilterOrderInfo, FilterWhere, SortDirection, SqlResult};

/// Filtered, ordered, paginated `SELECT`/`COUNT` over a single table.
pub struct QueryBuilder<T> {
    table_name: String,
    filter: FilterWhere,
    order: Vec<FilterOrderInfo>,
    limit: Option<i64>,
    offset: Option<i64>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    pub fn new(table_name: impl Into<String>) -> Result<Self, DatabaseError> {
        let name = table_name.into();
        quote_identifier(&name).map_err(|_| FilterError::InvalidTableName(name.clone()))?;
        Ok(Self {
            table_name: name,
            filter: FilterWhere::new(),
            order: Vec::new(),
            limit: None,
            offset: None,
            _phantom: std::marker::PhantomData,
        })
    }

    pub fn filter(mut self, filter: FilterWhere) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, column: &str, sort: SortDirection) -> Result<Self, DatabaseError> {
        quote_identifier(column)?;
        self.order.push(FilterOrderInfo { column: column.to_string(), sort });
        Ok(self)
    }

    pub fn paginate(mut self, limit: i64, offset: i64) -> Result<Self, DatabaseError> {
        if limit < 1 {
            return Err(FilterError::InvalidLimit(limit).into());
        }
        if offset < 0 {
            return Err(FilterError::InvalidOffset(offset).into());
        }
        self.limit = Some(limit);
        self.offset = Some(offset);
        Ok(self)
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.to_sql()?;
        tracing::debug!(sql = %sql_result.query, params = ?sql_result.params, "query");
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql_result = self.to_count_sql()?;
        tracing::debug!(sql = %sql_result.query, params = ?sql_result.params, "query");
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = q.bind(p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }

    pub fn to_sql(&self) -> Result<SqlResult, DatabaseError> {
        let (where_clause, params) = self.filter.clone().build()?;
        let mut query = format!(
            "SELECT * FROM {} WHERE {}",
            quote_identifier(&self.table_name)?,
            where_clause
        );

        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(|o| quote_identifier(&o.column).map(|c| format!("{} {}", c, o.sort.to_sql())))
                .collect::<Result<Vec<_>, _>>()?;
            query.push_str(&format!(" ORDER BY {}", order.join(", ")));
        }
        // Integers are validated in paginate(), safe to inline
        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            query.push_str(&format!(" OFFSET {}", offset));
        }

        Ok(SqlResult { query, params })
    }

    pub fn to_count_sql(&self) -> Result<SqlResult, DatabaseError> {
        let (where_clause, params) = self.filter.clone().build()?;
        let query = format!(
            "SELECT COUNT(*) AS count FROM {} WHERE {}",
            quote_identifier(&self.table_name)?,
            where_clause
        );
        Ok(SqlResult { query, params })
    }
}
