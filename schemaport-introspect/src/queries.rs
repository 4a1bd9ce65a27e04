//! Catalog SQL shared by the dialect drivers.
//!
//! Every catalog query binds the schema name (and table name where needed)
//! as parameters. Only [`sample_query`] builds SQL from identifiers, after
//! validating them.

use schemaport_schema::Dialect;

use crate::error::IntrospectResult;
use crate::source::validate_identifier;

/// SQL queries for MySQL introspection. Parameters use `?`.
pub mod mysql {
    /// Base tables of a schema. Params: schema.
    pub const TABLES: &str = r#"
        SELECT TABLE_NAME
        FROM INFORMATION_SCHEMA.TABLES
        WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE'
        ORDER BY TABLE_NAME
    "#;

    /// Columns of a table. Params: schema, table.
    pub const COLUMNS: &str = r#"
        SELECT
            COLUMN_NAME,
            ORDINAL_POSITION,
            DATA_TYPE,
            COLUMN_TYPE,
            COLUMN_KEY,
            COLUMN_DEFAULT,
            IS_NULLABLE,
            CHARACTER_MAXIMUM_LENGTH
        FROM INFORMATION_SCHEMA.COLUMNS
        WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ?
        ORDER BY ORDINAL_POSITION
    "#;

    /// Index columns of a table. Params: schema, table.
    pub const INDEXES: &str = r#"
        SELECT
            s.INDEX_NAME AS INDEX_NAME,
            s.COLUMN_NAME AS COLUMN_NAME,
            s.SEQ_IN_INDEX AS SEQ_IN_INDEX,
            s.NON_UNIQUE AS NON_UNIQUE,
            s.INDEX_TYPE AS INDEX_TYPE,
            s.COLLATION AS COLLATION,
            s.SUB_PART AS SUB_PART,
            IFNULL(t.CONSTRAINT_TYPE, 'INDEX') AS CONSTRAINT_TYPE
        FROM INFORMATION_SCHEMA.STATISTICS s
        LEFT OUTER JOIN INFORMATION_SCHEMA.TABLE_CONSTRAINTS t
            ON t.TABLE_SCHEMA = s.TABLE_SCHEMA
            AND t.TABLE_NAME = s.TABLE_NAME
            AND t.CONSTRAINT_NAME = s.INDEX_NAME
        WHERE s.TABLE_SCHEMA = ? AND s.TABLE_NAME = ?
        ORDER BY s.INDEX_NAME, s.SEQ_IN_INDEX
    "#;

    /// Foreign key column pairs of a table. Params: schema, table.
    pub const FOREIGN_KEYS: &str = r#"
        SELECT
            kcu.CONSTRAINT_NAME,
            kcu.COLUMN_NAME,
            kcu.REFERENCED_TABLE_NAME,
            kcu.REFERENCED_COLUMN_NAME
        FROM INFORMATION_SCHEMA.TABLE_CONSTRAINTS tc
        JOIN INFORMATION_SCHEMA.KEY_COLUMN_USAGE kcu
            ON tc.CONSTRAINT_NAME = kcu.CONSTRAINT_NAME
            AND tc.TABLE_NAME = kcu.TABLE_NAME
            AND tc.TABLE_SCHEMA = kcu.TABLE_SCHEMA
        WHERE tc.CONSTRAINT_TYPE = 'FOREIGN KEY'
            AND tc.TABLE_SCHEMA = ?
            AND tc.TABLE_NAME = ?
        ORDER BY kcu.CONSTRAINT_NAME, kcu.ORDINAL_POSITION
    "#;
}

/// SQL queries for PostgreSQL introspection. Parameters use `$n`.
pub mod postgres {
    /// Base tables of a schema. Params: schema.
    pub const TABLES: &str = r#"
        SELECT tablename::text
        FROM pg_catalog.pg_tables
        WHERE schemaname = $1
        ORDER BY tablename
    "#;

    /// Columns of a table. Params: schema, table.
    pub const COLUMNS: &str = r#"
        SELECT
            column_name::text,
            ordinal_position::int,
            data_type::text,
            column_default::text,
            is_nullable = 'YES' AS is_nullable,
            character_maximum_length::bigint
        FROM information_schema.columns
        WHERE table_schema = $1 AND table_name = $2
        ORDER BY ordinal_position
    "#;

    /// Index columns of a table. Params: schema, table.
    ///
    /// Expression columns have no attribute and come back with a NULL name.
    pub const INDEXES: &str = r#"
        SELECT
            ic.relname::text AS index_name,
            a.attname::text AS column_name,
            k.ord::int AS seq,
            i.indisprimary AS is_primary,
            i.indisunique AS is_unique,
            (i.indoption[(k.ord - 1)::int]::int & 1) = 0 AS ascending
        FROM pg_index i
        JOIN pg_class ic ON ic.oid = i.indexrelid
        CROSS JOIN LATERAL unnest(i.indkey) WITH ORDINALITY AS k(attnum, ord)
        LEFT JOIN pg_attribute a
            ON a.attrelid = i.indrelid AND a.attnum = k.attnum
        WHERE i.indrelid = (quote_ident($1) || '.' || quote_ident($2))::regclass
        ORDER BY ic.relname, k.ord
    "#;

    /// Foreign key column pairs of a table. Params: schema, table.
    pub const FOREIGN_KEYS: &str = r#"
        SELECT
            kcu.constraint_name::text,
            kcu.column_name::text,
            ccu.table_name::text AS referenced_table,
            ccu.column_name::text AS referenced_column
        FROM information_schema.referential_constraints rc
        JOIN information_schema.key_column_usage kcu
            ON kcu.constraint_schema = rc.constraint_schema
            AND kcu.constraint_name = rc.constraint_name
        JOIN information_schema.key_column_usage ccu
            ON ccu.constraint_schema = rc.unique_constraint_schema
            AND ccu.constraint_name = rc.unique_constraint_name
            AND ccu.ordinal_position = kcu.position_in_unique_constraint
        WHERE kcu.table_schema = $1 AND kcu.table_name = $2
        ORDER BY kcu.constraint_name, kcu.ordinal_position
    "#;
}

/// Build the random-sample query for a table.
///
/// Postgres rows come back as one JSON text column per row; MySQL rows are
/// returned as-is and converted by the driver.
pub fn sample_query(
    dialect: Dialect,
    schema: &str,
    table: &str,
    limit: usize,
) -> IntrospectResult<String> {
    let schema = dialect.quote_ident(validate_identifier(schema)?);
    let table = dialect.quote_ident(validate_identifier(table)?);

    Ok(match dialect {
        Dialect::MySql => format!(
            "SELECT * FROM {}.{} ORDER BY RAND() LIMIT {}",
            schema, table, limit
        ),
        Dialect::Postgres => format!(
            "SELECT row_to_json(t)::text FROM (SELECT * FROM {}.{} ORDER BY RANDOM() LIMIT {}) t",
            schema, table, limit
        ),
    })
}
