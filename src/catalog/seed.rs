//! The products a new catalog starts with.

use crate::catalog::{Catalog, CategoryName, LocalizedName, Prices, Product};

/// (id, category, [uk, en, de, pl], [uah, usd, eur, pln])
type SeedRow = (i64, &'static str, [&'static str; 4], [f64; 4]);

const SEED_PRODUCTS: [SeedRow; 17] = [
    (1, "berries", ["Полуниця", "Strawberry", "Erdbeere", "Truskawka"], [120.0, 3.2, 2.9, 13.5]),
    (2, "berries", ["Малина", "Raspberry", "Himbeere", "Malina"], [160.0, 4.3, 3.9, 18.0]),
    (3, "berries", ["Чорниця", "Blueberry", "Blaubeere", "Borówka"], [180.0, 4.8, 4.4, 20.5]),
    (4, "berries", ["Лохина", "Bilberry", "Heidelbeere", "Jagoda"], [200.0, 5.4, 4.9, 22.5]),
    (5, "berries", ["Ожина", "Blackberry", "Brombeere", "Jeżyna"], [150.0, 4.0, 3.6, 17.0]),
    (6, "berries", ["Смородина", "Currant", "Johannisbeere", "Porzeczka"], [110.0, 3.0, 2.7, 12.5]),
    (7, "fruits", ["Яблуко", "Apple", "Apfel", "Jabłko"], [45.0, 1.2, 1.1, 5.0]),
    (8, "fruits", ["Груша", "Pear", "Birne", "Gruszka"], [60.0, 1.6, 1.4, 6.5]),
    (9, "fruits", ["Персик", "Peach", "Pfirsich", "Brzoskwinia"], [80.0, 2.1, 1.9, 9.0]),
    (10, "fruits", ["Абрикос", "Apricot", "Aprikose", "Morela"], [90.0, 2.4, 2.2, 10.0]),
    (11, "fruits", ["Слива", "Plum", "Pflaume", "Śliwka"], [70.0, 1.9, 1.7, 8.0]),
    (12, "vegetables", ["Морква", "Carrot", "Karotte", "Marchew"], [35.0, 0.9, 0.8, 4.0]),
    (13, "vegetables", ["Броколі", "Broccoli", "Brokkoli", "Brokuły"], [50.0, 1.3, 1.2, 5.5]),
    (14, "vegetables", ["Картопля", "Potato", "Kartoffel", "Ziemniak"], [25.0, 0.7, 0.6, 3.0]),
    (15, "vegetables", ["Цвітна капуста", "Cauliflower", "Blumenkohl", "Kalafior"], [40.0, 1.1, 1.0, 4.5]),
    (16, "vegetables", ["Перець", "Bell Pepper", "Paprika", "Papryka"], [65.0, 1.7, 1.5, 7.0]),
    (17, "vegetables", ["Кабачок", "Zucchini", "Zucchini", "Cukinia"], [45.0, 1.2, 1.1, 5.0]),
];

/// The catalog written to disk the first time the catalog is read.
pub fn default_catalog() -> Catalog {
    SEED_PRODUCTS
        .iter()
        .map(|&(id, category, [uk, en, de, pl], [uah, usd, eur, pln])| Product {
            id,
            name: LocalizedName {
                uk: uk.to_owned(),
                en: en.to_owned(),
                de: de.to_owned(),
                pl: pl.to_owned(),
            },
            prices: Prices { uah, usd, eur, pln },
            category: CategoryName::new_unchecked(category),
        })
        .collect()
}
