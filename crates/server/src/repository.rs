use async_trait::async_trait;
use rust_decimal::Decimal;
use sales_report::ReportRow;
use sqlx::{FromRow, PgPool};

use crate::error::Result;

/// Per-customer order totals, largest first. Customers without orders
/// contribute a zero total.
const CUSTOMER_TOTALS_QUERY: &str = r#"
    SELECT c.nome_cliente, COALESCE(SUM(p.total_pedido), 0)::numeric AS total_pedido
    FROM cliente c
    LEFT JOIN pedido p ON c.codigo_cliente = p.codigo_cliente
    GROUP BY c.nome_cliente
    ORDER BY total_pedido DESC
"#;

/// Source of the rows printed on the sales report.
///
/// Implementations return rows ordered by amount, descending. An empty vector
/// is a valid answer, not an error.
#[async_trait]
pub trait SalesRepository: Send + Sync {
    async fn fetch_customer_totals(&self) -> Result<Vec<ReportRow>>;
}

#[derive(Debug, FromRow)]
struct CustomerTotalRecord {
    nome_cliente: String,
    total_pedido: Decimal,
}

impl From<CustomerTotalRecord> for ReportRow {
    fn from(record: CustomerTotalRecord) -> Self {
        ReportRow::new(record.nome_cliente, record.total_pedido)
    }
}

/// PostgreSQL-backed repository over the `cliente` and `pedido` tables.
#[derive(Clone)]
pub struct PgSalesRepository {
    pool: PgPool,
}

impl PgSalesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SalesRepository for PgSalesRepository {
    async fn fetch_customer_totals(&self) -> Result<Vec<ReportRow>> {
        let records: Vec<CustomerTotalRecord> = sqlx::query_as(CUSTOMER_TOTALS_QUERY)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(rows = records.len(), "fetched customer totals");
        Ok(records.into_iter().map(ReportRow::from).collect())
    }
}
