//! Categories command - Product category maintenance.

use crate::cli::args::{CategoriesAction, CategoriesArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{CategoryRepository, CategoryStore, Database};

/// Execute the categories command
pub async fn execute(args: CategoriesArgs, config: Config) -> AppResult<()> {
    let db = Database::connect(&config).await?;
    let categories = CategoryStore::new(db.get_connection());

    match args.action {
        CategoriesAction::Add { name } => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Category name is required"));
            }

            let category = categories.create(name).await?;
            tracing::info!(
                category_id = %category.product_category_id,
                name = %category.product_category_name,
                "Product category added"
            );
            println!(
                "{}\t{}",
                category.product_category_id, category.product_category_name
            );
        }
        CategoriesAction::List => {
            for category in categories.list().await? {
                println!(
                    "{}\t{}",
                    category.product_category_id, category.product_category_name
                );
            }
        }
    }

    Ok(())
}
