//! Canonical write-ready menu document and its identifier derivation.

use serde::{Deserialize, Serialize};

/// Source column names as they appear in the input file header.
pub mod columns {
    pub const CATEGORY: &str = "カテゴリー";
    pub const DISH_NAME: &str = "料理名";
    pub const PROTEIN: &str = "タンパク質";
    pub const FAT: &str = "脂質";
    pub const CARBOHYDRATES: &str = "炭水化物";
    pub const TOTAL_CALORIES: &str = "総カロリー";
    pub const IMAGE_URL: &str = "画像パス";
    pub const STATUS: &str = "販売状態";
    pub const DISPLAY_ORDER: &str = "表示順";

    /// All nine required columns, in canonical field order.
    pub const REQUIRED: [&str; 9] = [
        CATEGORY,
        DISH_NAME,
        PROTEIN,
        FAT,
        CARBOHYDRATES,
        TOTAL_CALORIES,
        IMAGE_URL,
        STATUS,
        DISPLAY_ORDER,
    ];
}

/// How the document identifier is derived from a menu item.
///
/// `DishName` reproduces the historical keying and silently overwrites
/// when two categories share a dish name. `CategoryDish` keys by
/// `{category}_{dishName}` so such rows land in distinct documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    #[default]
    DishName,
    CategoryDish,
}

/// One write-ready menu document.
///
/// Serializes with the canonical camelCase field names the menu frontend
/// reads back from the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub category: String,
    pub dish_name: String,
    pub protein: f64,
    pub fat: f64,
    pub carbohydrates: f64,
    pub total_calories: f64,
    pub image_url: String,
    pub status: String,
    pub display_order: i64,
}

impl MenuItem {
    /// Document identifier under the given key mode.
    ///
    /// The value is not sanitized: characters the store rejects in an
    /// identifier surface as a write-time rejection, not here.
    pub fn document_id(&self, mode: KeyMode) -> String {
        match mode {
            KeyMode::DishName => self.dish_name.clone(),
            KeyMode::CategoryDish => format!("{}_{}", self.category, self.dish_name),
        }
    }
}
