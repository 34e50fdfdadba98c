//! Core catalog domain types.

use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::Error;

/// Identifier for a product, unique across every category in the catalog.
pub type ProductId = i64;

/// A validated, non-empty category name, e.g. "berries".
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::MissingCategory] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::MissingCategory)
        } else {
            Ok(Self(name.to_owned()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CategoryName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        CategoryName::new(&value)
    }
}

impl From<CategoryName> for String {
    fn from(value: CategoryName) -> Self {
        value.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A product's display name in every supported locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedName {
    /// Ukrainian.
    pub uk: String,
    /// English.
    pub en: String,
    /// German.
    pub de: String,
    /// Polish.
    pub pl: String,
}

impl LocalizedName {
    fn validate(&self) -> Result<(), Error> {
        let locales = [
            ("uk", &self.uk),
            ("en", &self.en),
            ("de", &self.de),
            ("pl", &self.pl),
        ];

        match locales.iter().find(|(_, name)| name.trim().is_empty()) {
            Some((locale, _)) => Err(Error::InvalidProduct(format!(
                "the name for locale \"{locale}\" is missing"
            ))),
            None => Ok(()),
        }
    }
}

/// A product's price in every supported currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    /// Ukrainian hryvnia.
    pub uah: f64,
    /// US dollar.
    pub usd: f64,
    /// Euro.
    pub eur: f64,
    /// Polish złoty.
    pub pln: f64,
}

impl Prices {
    fn validate(&self) -> Result<(), Error> {
        let currencies = [
            ("uah", self.uah),
            ("usd", self.usd),
            ("eur", self.eur),
            ("pln", self.pln),
        ];

        match currencies
            .iter()
            .find(|(_, price)| !price.is_finite() || *price < 0.0)
        {
            Some((currency, price)) => Err(Error::InvalidProduct(format!(
                "the price in {currency} must be a non-negative number, got {price}"
            ))),
            None => Ok(()),
        }
    }
}

/// The fields of a product that a client supplies when creating one.
///
/// The id is assigned by the catalog and the category comes from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    /// The product's name in each locale.
    pub name: LocalizedName,
    /// The product's price in each currency.
    pub prices: Prices,
}

impl ProductDraft {
    /// Check that every name is present and every price is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidProduct] describing the first problem found.
    pub fn validate(&self) -> Result<(), Error> {
        self.name.validate()?;
        self.prices.validate()
    }
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// The catalog-wide unique id.
    pub id: ProductId,
    /// The product's name in each locale.
    pub name: LocalizedName,
    /// The product's price in each currency.
    pub prices: Prices,
    /// The category the product is stored under.
    pub category: CategoryName,
}

impl Product {
    /// Check that every name is present and every price is non-negative.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidProduct] describing the first problem found.
    pub fn validate(&self) -> Result<(), Error> {
        self.name.validate()?;
        self.prices.validate()
    }
}

/// Every product, grouped by category.
///
/// Products keep their insertion order within a category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog(BTreeMap<CategoryName, Vec<Product>>);

impl Catalog {
    /// The products stored under `category`, in insertion order.
    pub fn products(&self, category: &CategoryName) -> &[Product] {
        self.0
            .get(category)
            .map(|products| products.as_slice())
            .unwrap_or(&[])
    }

    /// The mutable list of products for an existing category.
    pub fn products_mut(&mut self, category: &CategoryName) -> Option<&mut Vec<Product>> {
        self.0.get_mut(category)
    }

    /// The highest id across every category, or zero for an empty catalog.
    pub fn max_id(&self) -> ProductId {
        self.0
            .values()
            .flatten()
            .map(|product| product.id)
            .max()
            .unwrap_or(0)
    }

    /// Create a product from `draft` with the next free id and append it to
    /// `category`, creating the category if needed.
    pub fn insert(&mut self, category: CategoryName, draft: ProductDraft) -> Product {
        let product = Product {
            id: self.max_id() + 1,
            name: draft.name,
            prices: draft.prices,
            category: category.clone(),
        };

        self.0.entry(category).or_default().push(product.clone());

        product
    }

    /// The category names in the catalog.
    pub fn categories(&self) -> impl Iterator<Item = &CategoryName> {
        self.0.keys()
    }

    /// The total number of products across all categories.
    pub fn product_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(products: I) -> Self {
        let mut catalog = Catalog::default();

        for product in products {
            catalog
                .0
                .entry(product.category.clone())
                .or_default()
                .push(product);
        }

        catalog
    }
}
