use serde::{Deserialize, Serialize};

// Nutrition values stay as the site renders them (locale-formatted
// strings), so every field is opaque text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub quantity: String,
    pub fat: String,
    pub carbs: String,
    pub protein: String,
    pub calories: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealData {
    pub name: String,
    pub fat: String,
    pub carbs: String,
    pub protein: String,
    pub calories: String,
    pub items: Vec<FoodItem>,
}

/// One day of a user's food diary. An empty `date` means the page held
/// no extractable data; such entries are never cached or reported.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub date: String,
    pub calories: String,
    pub idr: String,
    pub fat: String,
    pub protein: String,
    pub carbs: String,
    pub timestamp: String,
    pub meals: Vec<MealData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub id: String,
}

/// Payload of one cache file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CachedEntry {
    pub user: User,
    pub entry: DiaryEntry,
}
