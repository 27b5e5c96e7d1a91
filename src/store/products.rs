//! Product Store
//! Mission: Persist the product catalog

use crate::models::{CreateProductRequest, Product, UpdateProductRequest};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Product storage with SQLite backend.
pub struct ProductStore {
    db_path: String,
}

impl ProductStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS products (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                price REAL NOT NULL,
                description TEXT NOT NULL,
                image TEXT NOT NULL,
                category TEXT NOT NULL,
                in_stock INTEGER NOT NULL,
                stock INTEGER NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<Product>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, price, description, image, category, in_stock, stock,
                    created_at, updated_at
             FROM products ORDER BY created_at",
        )?;

        let products = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(products)
    }

    pub fn get(&self, id: &Uuid) -> Result<Option<Product>> {
        let conn = Connection::open(&self.db_path)?;
        let mut stmt = conn.prepare(
            "SELECT id, name, price, description, image, category, in_stock, stock,
                    created_at, updated_at
             FROM products WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::map_row) {
            Ok(p) => Ok(Some(p)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn create(&self, req: &CreateProductRequest) -> Result<Product> {
        let now = Utc::now().to_rfc3339();
        let product = Product {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            price: req.price,
            description: req.description.clone(),
            image: req.image.clone(),
            category: req.category.clone(),
            in_stock: req.stock > 0,
            stock: req.stock,
            created_at: now.clone(),
            updated_at: now,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO products (id, name, price, description, image, category,
                                   in_stock, stock, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                product.id.to_string(),
                product.name,
                product.price,
                product.description,
                product.image,
                product.category,
                product.in_stock,
                product.stock,
                product.created_at,
                product.updated_at,
            ],
        )
        .context("Failed to insert product")?;

        Ok(product)
    }

    /// Apply a partial update; `in_stock` is recomputed from the final stock.
    pub fn update(&self, id: &Uuid, req: &UpdateProductRequest) -> Result<Option<Product>> {
        let Some(mut product) = self.get(id)? else {
            return Ok(None);
        };

        if let Some(name) = &req.name {
            product.name = name.clone();
        }
        if let Some(price) = req.price {
            product.price = price;
        }
        if let Some(description) = &req.description {
            product.description = description.clone();
        }
        if let Some(image) = &req.image {
            product.image = image.clone();
        }
        if let Some(category) = &req.category {
            product.category = category.clone();
        }
        if let Some(stock) = req.stock {
            product.stock = stock;
        }
        product.in_stock = product.stock > 0;
        product.updated_at = Utc::now().to_rfc3339();

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE products SET name = ?1, price = ?2, description = ?3, image = ?4,
                                 category = ?5, in_stock = ?6, stock = ?7, updated_at = ?8
             WHERE id = ?9",
            params![
                product.name,
                product.price,
                product.description,
                product.image,
                product.category,
                product.in_stock,
                product.stock,
                product.updated_at,
                product.id.to_string(),
            ],
        )
        .context("Failed to update product")?;

        Ok(Some(product))
    }

    /// Delete a product; returns false when no row matched.
    pub fn delete(&self, id: &Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let deleted = conn.execute(
            "DELETE FROM products WHERE id = ?1",
            params![id.to_string()],
        )?;
        Ok(deleted > 0)
    }

    /// Remove every product. Used by the seed binary.
    pub fn clear(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;
        conn.execute("DELETE FROM products", [])?;
        Ok(())
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Product> {
        Ok(Product {
            id: Uuid::parse_str(&row.get::<_, String>(0)?).unwrap(),
            name: row.get(1)?,
            price: row.get(2)?,
            description: row.get(3)?,
            image: row.get(4)?,
            category: row.get(5)?,
            in_stock: row.get(6)?,
            stock: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}
