use sqlx::sqlite::SqlitePool;

pub async fn setup(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // Create customers table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT UNIQUE NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            is_active BOOLEAN DEFAULT true
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Create orders table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER REFERENCES customers(id),
            total REAL NOT NULL,
            status TEXT DEFAULT 'pending',
            placed_at DATETIME DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    seed_sample_data(pool).await?;

    Ok(())
}

async fn seed_sample_data(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let customer_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(pool)
        .await?;

    if customer_count > 0 {
        return Ok(());
    }

    sqlx::query(
        r#"
        INSERT INTO customers (name, email) VALUES
            ('Ada Lovelace', 'ada@example.com'),
            ('Grace Hopper', 'grace@example.com'),
            ('Edsger Dijkstra', 'edsger@example.com')
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO orders (customer_id, total, status) VALUES
            (1, 129.90, 'shipped'),
            (1, 19.99, 'pending'),
            (2, 540.00, 'shipped'),
            (3, 75.25, 'cancelled')
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
