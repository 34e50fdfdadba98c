//! The catalog store: CRUD over the catalog document.

use std::{
    path::PathBuf,
    sync::{Mutex, MutexGuard},
};

use crate::{
    Error,
    catalog::{Catalog, CategoryName, Product, ProductDraft, ProductId},
    document::JsonDocument,
};

/// Creates, reads, updates and deletes products in a catalog document.
///
/// Every operation loads the whole catalog, changes it in memory and saves it
/// again. Changes are serialized by a single write lock so that concurrent
/// requests cannot overwrite each other's changes. Reads do not take the lock
/// and see the last saved catalog.
#[derive(Debug)]
pub struct CatalogStore {
    document: JsonDocument<Catalog>,
    seed: Catalog,
    write_lock: Mutex<()>,
}

impl CatalogStore {
    /// Create a store for the catalog document at `path`.
    ///
    /// If the document does not exist, it is created from `seed` on first
    /// access.
    pub fn new(path: impl Into<PathBuf>, seed: Catalog) -> Self {
        Self {
            document: JsonDocument::new(path),
            seed,
            write_lock: Mutex::new(()),
        }
    }

    /// Get every product, grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the catalog cannot be read.
    pub fn list_all(&self) -> Result<Catalog, Error> {
        self.load()
    }

    /// Get the products in `category`, or an empty list if the category does
    /// not exist.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the catalog cannot be read.
    pub fn list_by_category(&self, category: &CategoryName) -> Result<Vec<Product>, Error> {
        Ok(self.load()?.products(category).to_vec())
    }

    /// Add a product built from `draft` to the end of `category`.
    ///
    /// The new product's id is one more than the largest id in the whole
    /// catalog, so ids stay unique across categories.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidProduct] if the draft is incomplete, or an
    /// [Error::StorageError] if the catalog cannot be read or saved.
    pub fn create(&self, category: CategoryName, draft: ProductDraft) -> Result<Product, Error> {
        draft.validate()?;

        let _guard = self.lock()?;
        let mut catalog = self.load()?;
        let product = catalog.insert(category, draft);
        self.document.save(&catalog)?;

        tracing::info!(
            "Created product {} in category \"{}\"",
            product.id,
            product.category
        );

        Ok(product)
    }

    /// Replace the product with the same id in the product's category.
    ///
    /// The product is only looked up in the category it names. A product that
    /// exists under a different category is not found.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidProduct] if the product is incomplete, an
    /// [Error::UpdateMissingProduct] if the category does not contain the id,
    /// or an [Error::StorageError] if the catalog cannot be read or saved.
    pub fn update(&self, product: Product) -> Result<Product, Error> {
        product.validate()?;

        let _guard = self.lock()?;
        let mut catalog = self.load()?;

        let existing = catalog
            .products_mut(&product.category)
            .and_then(|products| products.iter_mut().find(|p| p.id == product.id))
            .ok_or(Error::UpdateMissingProduct)?;
        *existing = product.clone();

        self.document.save(&catalog)?;

        tracing::info!(
            "Updated product {} in category \"{}\"",
            product.id,
            product.category
        );

        Ok(product)
    }

    /// Remove the product with `id` from `category`.
    ///
    /// Returns whether a product was removed. The catalog is only saved when
    /// something was removed.
    ///
    /// # Errors
    ///
    /// Returns an [Error::StorageError] if the catalog cannot be read or saved.
    pub fn delete(&self, id: ProductId, category: &CategoryName) -> Result<bool, Error> {
        let _guard = self.lock()?;
        let mut catalog = self.load()?;

        let Some(products) = catalog.products_mut(category) else {
            return Ok(false);
        };
        let Some(index) = products.iter().position(|product| product.id == id) else {
            return Ok(false);
        };
        products.remove(index);

        self.document.save(&catalog)?;

        tracing::info!("Deleted product {id} from category \"{category}\"");

        Ok(true)
    }

    fn load(&self) -> Result<Catalog, Error> {
        self.document.load_or_seed(|| self.seed.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, Error> {
        self.write_lock.lock().map_err(|error| {
            tracing::error!("could not acquire catalog lock: {error}");
            Error::LockError("catalog")
        })
    }
}

#[cfg(test)]
mod catalog_store_tests {
    use std::{collections::HashSet, fs, sync::Arc, thread};

    use tempfile::TempDir;

    use crate::{
        Error,
        catalog::{
            Catalog, CatalogStore, CategoryName, Prices, Product, default_catalog,
            test_utils::{raspberry_draft, strawberry_draft},
        },
    };

    fn get_empty_store() -> (TempDir, CatalogStore) {
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = CatalogStore::new(dir.path().join("products.json"), Catalog::default());

        (dir, store)
    }

    fn berries() -> CategoryName {
        CategoryName::new_unchecked("berries")
    }

    fn fruits() -> CategoryName {
        CategoryName::new_unchecked("fruits")
    }

    #[test]
    fn first_read_writes_seed() {
        let dir = TempDir::new().expect("Could not create temp dir");
        let path = dir.path().join("products.json");
        let store = CatalogStore::new(&path, default_catalog());

        let catalog = store.list_all().expect("Could not list catalog");

        assert_eq!(catalog, default_catalog());
        assert!(path.is_file(), "want catalog file to be created on first read");
    }

    #[test]
    fn list_missing_category_is_empty() {
        let (_dir, store) = get_empty_store();

        let products = store
            .list_by_category(&CategoryName::new_unchecked("mushrooms"))
            .expect("Could not list category");

        assert!(products.is_empty());
    }

    #[test]
    fn create_in_empty_store_assigns_id_one() {
        let (_dir, store) = get_empty_store();

        let product = store
            .create(berries(), raspberry_draft())
            .expect("Could not create product");

        assert_eq!(product.id, 1);
        assert_eq!(product.category, berries());
        assert_eq!(product.name.uk, "Малина");
        assert_eq!(store.list_by_category(&berries()), Ok(vec![product]));
    }

    #[test]
    fn create_uses_global_counter_across_categories() {
        let (_dir, store) = get_empty_store();
        store
            .create(berries(), raspberry_draft())
            .expect("Could not create product");

        let product = store
            .create(fruits(), strawberry_draft())
            .expect("Could not create product");

        assert_eq!(product.id, 2);
    }

    #[test]
    fn create_ids_increase_after_seed() {
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = CatalogStore::new(dir.path().join("products.json"), default_catalog());

        let product = store
            .create(fruits(), raspberry_draft())
            .expect("Could not create product");

        assert_eq!(product.id, 18);
    }

    #[test]
    fn create_ids_are_monotonic_and_unique() {
        let (_dir, store) = get_empty_store();
        let categories = [berries(), fruits(), berries(), CategoryName::new_unchecked("vegetables")];

        let mut previous_id = 0;
        for category in categories {
            let product = store
                .create(category, raspberry_draft())
                .expect("Could not create product");
            assert!(
                product.id > previous_id,
                "want id greater than {previous_id}, got {}",
                product.id
            );
            previous_id = product.id;
        }
    }

    #[test]
    fn create_after_delete_continues_from_max_id() {
        let (_dir, store) = get_empty_store();
        let first = store.create(berries(), raspberry_draft()).unwrap();
        let second = store.create(fruits(), raspberry_draft()).unwrap();
        store.delete(first.id, &berries()).unwrap();

        let third = store.create(berries(), raspberry_draft()).unwrap();

        assert_eq!(third.id, second.id + 1);
    }

    #[test]
    fn create_appends_to_end_of_category() {
        let (_dir, store) = get_empty_store();
        let first = store.create(berries(), strawberry_draft()).unwrap();
        let second = store.create(berries(), raspberry_draft()).unwrap();

        let products = store.list_by_category(&berries()).unwrap();

        assert_eq!(products, vec![first, second]);
    }

    #[test]
    fn create_rejects_invalid_draft_without_writing() {
        let (_dir, store) = get_empty_store();
        let mut draft = raspberry_draft();
        draft.name.en = String::new();

        let result = store.create(berries(), draft);

        assert!(matches!(result, Err(Error::InvalidProduct(_))));
        assert_eq!(store.list_all(), Ok(Catalog::default()));
    }

    #[test]
    fn update_replaces_in_place() {
        let (_dir, store) = get_empty_store();
        let first = store.create(berries(), strawberry_draft()).unwrap();
        let second = store.create(berries(), raspberry_draft()).unwrap();
        let third = store.create(berries(), strawberry_draft()).unwrap();
        let updated = Product {
            prices: Prices {
                uah: 170.0,
                ..second.prices.clone()
            },
            ..second
        };

        let got = store.update(updated.clone()).expect("Could not update product");

        assert_eq!(got, updated);
        assert_eq!(
            store.list_by_category(&berries()),
            Ok(vec![first, updated, third])
        );
    }

    #[test]
    fn update_with_wrong_category_is_not_found() {
        let (_dir, store) = get_empty_store();
        let raspberry = store.create(berries(), raspberry_draft()).unwrap();
        store.create(fruits(), strawberry_draft()).unwrap();
        let moved = Product {
            category: fruits(),
            ..raspberry.clone()
        };

        let result = store.update(moved);

        assert_eq!(result, Err(Error::UpdateMissingProduct));
        assert_eq!(store.list_by_category(&berries()), Ok(vec![raspberry]));
    }

    #[test]
    fn update_in_missing_category_is_not_found() {
        let (_dir, store) = get_empty_store();
        let raspberry = store.create(berries(), raspberry_draft()).unwrap();
        let moved = Product {
            category: CategoryName::new_unchecked("mushrooms"),
            ..raspberry
        };

        assert_eq!(store.update(moved), Err(Error::UpdateMissingProduct));
    }

    #[test]
    fn update_rejects_invalid_product() {
        let (_dir, store) = get_empty_store();
        let mut raspberry = store.create(berries(), raspberry_draft()).unwrap();
        let before = store.list_all().unwrap();
        raspberry.prices.eur = f64::NAN;

        let result = store.update(raspberry);

        assert!(matches!(result, Err(Error::InvalidProduct(_))));
        assert_eq!(store.list_all(), Ok(before));
    }

    #[test]
    fn delete_removes_product() {
        let (_dir, store) = get_empty_store();
        let raspberry = store.create(berries(), raspberry_draft()).unwrap();

        let removed = store.delete(raspberry.id, &berries()).unwrap();

        assert!(removed);
        assert_eq!(store.list_by_category(&berries()), Ok(vec![]));
    }

    #[test]
    fn delete_miss_leaves_document_untouched() {
        let dir = TempDir::new().expect("Could not create temp dir");
        let path = dir.path().join("products.json");
        let store = CatalogStore::new(&path, default_catalog());
        store.list_all().unwrap();
        let before = fs::read(&path).unwrap();

        let removed_wrong_category = store.delete(1, &fruits()).unwrap();
        let removed_missing_id = store.delete(999, &berries()).unwrap();
        let removed_missing_category = store
            .delete(1, &CategoryName::new_unchecked("mushrooms"))
            .unwrap();

        assert!(!removed_wrong_category);
        assert!(!removed_missing_id);
        assert!(!removed_missing_category);
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn list_by_category_only_returns_that_partition() {
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = CatalogStore::new(dir.path().join("products.json"), default_catalog());
        store.create(fruits(), raspberry_draft()).unwrap();

        for category in [berries(), fruits()] {
            let products = store.list_by_category(&category).unwrap();
            assert!(!products.is_empty());
            assert!(products.iter().all(|product| product.category == category));
        }
    }

    #[test]
    fn concurrent_creates_do_not_lose_updates() {
        const WRITERS: usize = 16;
        let (_dir, store) = get_empty_store();
        let store = Arc::new(store);

        let handles: Vec<_> = (0..WRITERS)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store
                        .create(berries(), raspberry_draft())
                        .expect("Could not create product")
                })
            })
            .collect();
        let created: Vec<Product> = handles
            .into_iter()
            .map(|handle| handle.join().expect("writer thread panicked"))
            .collect();

        let ids: HashSet<_> = created.iter().map(|product| product.id).collect();
        assert_eq!(ids.len(), WRITERS);
        assert_eq!(store.list_by_category(&berries()).unwrap().len(), WRITERS);
    }

    #[test]
    fn concurrent_first_reads_all_see_the_seed() {
        const READERS: usize = 16;
        let dir = TempDir::new().expect("Could not create temp dir");
        let store = Arc::new(CatalogStore::new(
            dir.path().join("products.json"),
            default_catalog(),
        ));

        let handles: Vec<_> = (0..READERS)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.list_all().expect("Could not read catalog"))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("reader thread panicked"), default_catalog());
        }
        let product = store.create(berries(), raspberry_draft()).unwrap();
        assert_eq!(product.id, default_catalog().max_id() + 1);
    }

    #[test]
    fn create_surfaces_storage_errors() {
        let dir = TempDir::new().expect("Could not create temp dir");
        let path = dir.path().join("products.json");
        fs::write(&path, "not a catalog").unwrap();
        let store = CatalogStore::new(&path, Catalog::default());

        let result = store.create(berries(), raspberry_draft());

        assert!(matches!(result, Err(Error::StorageError(_, _))));
    }
}
