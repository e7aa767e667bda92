use atelier_derive::api_model;
use atelier_kernel::time::millis;
use atelier_kernel::validation::{self, MAX_NAME_CHARS, ValidationError};
use chrono::{DateTime, Utc};

pub const MAX_MENU_ITEMS: usize = 50;
pub const MAX_NAV_ITEMS: usize = 20;
pub const MAX_COLUMNS: usize = 6;
pub const MAX_CATEGORIES: usize = 30;

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub open_in_new_tab: bool,
}

/// Named link list (footer columns, account menu, ...).
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct Menu {
    /// Slug; also the record key.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
    #[serde(with = "millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl Menu {
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.items.sort_by_key(|item| item.position);
        self
    }
}

/// Body of `PUT /api/admin/menus/{name}`.
#[api_model]
pub struct MenuInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

impl MenuInput {
    /// # Errors
    /// Too many items, blank labels or unsupported links.
    pub fn into_menu(self, name: String, now: DateTime<Utc>) -> Result<Menu, ValidationError> {
        validation::max_items("items", self.items.len(), MAX_MENU_ITEMS)?;
        let items = self
            .items
            .into_iter()
            .map(|item| {
                Ok(MenuItem {
                    label: validation::required("items.label", &item.label, MAX_NAME_CHARS)?,
                    url: validation::link("items.url", &item.url)?,
                    ..item
                })
            })
            .collect::<Result<_, ValidationError>>()?;

        Ok(Menu {
            name,
            title: validation::optional("title", self.title.as_deref(), MAX_NAME_CHARS)?,
            items,
            created_at: now,
            updated_at: now,
        }
        .sorted())
    }
}

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub position: i32,
}

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct MegaMenuColumn {
    pub title: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub position: i32,
}

/// Drop-down panel under a navbar item.
#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct MegaMenu {
    #[serde(default)]
    pub columns: Vec<MegaMenuColumn>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_link: Option<String>,
}

#[api_model(stored)]
#[derive(Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub url: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub highlight: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mega_menu: Option<MegaMenu>,
}

/// Main storefront navigation (singleton).
#[api_model(stored)]
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Navbar {
    #[serde(default)]
    pub items: Vec<NavItem>,
    /// Epoch when the navbar was never saved.
    #[serde(with = "millis")]
    pub updated_at: DateTime<Utc>,
}

impl Navbar {
    /// Orders items, mega-menu columns and categories by `position`.
    #[must_use]
    pub fn sorted(mut self) -> Self {
        self.items.sort_by_key(|item| item.position);
        for menu in self.items.iter_mut().filter_map(|item| item.mega_menu.as_mut()) {
            menu.columns.sort_by_key(|column| column.position);
            for column in &mut menu.columns {
                column.categories.sort_by_key(|category| category.position);
            }
        }
        self
    }
}

/// Body of `PUT /api/admin/navbar`.
#[api_model]
pub struct NavbarInput {
    #[serde(default)]
    pub items: Vec<NavItem>,
}

impl NavbarInput {
    /// # Errors
    /// Limits on items, columns and categories; blank labels; unsupported links.
    pub fn into_navbar(self, now: DateTime<Utc>) -> Result<Navbar, ValidationError> {
        validation::max_items("items", self.items.len(), MAX_NAV_ITEMS)?;
        let items = self.items.into_iter().map(validate_nav_item).collect::<Result<_, _>>()?;
        Ok(Navbar { items, updated_at: now }.sorted())
    }
}

fn validate_nav_item(item: NavItem) -> Result<NavItem, ValidationError> {
    let mega_menu = item.mega_menu.map(validate_mega_menu).transpose()?;
    Ok(NavItem {
        label: validation::required("items.label", &item.label, MAX_NAME_CHARS)?,
        url: validation::link("items.url", &item.url)?,
        mega_menu,
        ..item
    })
}

fn validate_mega_menu(menu: MegaMenu) -> Result<MegaMenu, ValidationError> {
    validation::max_items("megaMenu.columns", menu.columns.len(), MAX_COLUMNS)?;
    let columns = menu
        .columns
        .into_iter()
        .map(|column| {
            validation::max_items("megaMenu.categories", column.categories.len(), MAX_CATEGORIES)?;
            let categories = column
                .categories
                .into_iter()
                .map(|category| {
                    Ok(Category {
                        name: validation::required("categories.name", &category.name, MAX_NAME_CHARS)?,
                        url: validation::link("categories.url", &category.url)?,
                        position: category.position,
                    })
                })
                .collect::<Result<_, ValidationError>>()?;
            Ok(MegaMenuColumn {
                title: validation::required("columns.title", &column.title, MAX_NAME_CHARS)?,
                categories,
                position: column.position,
            })
        })
        .collect::<Result<_, ValidationError>>()?;

    Ok(MegaMenu {
        columns,
        featured_image_url: validation::optional_link(
            "megaMenu.featuredImageUrl",
            menu.featured_image_url.as_deref(),
        )?,
        featured_link: validation::optional_link("megaMenu.featuredLink", menu.featured_link.as_deref())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, position: i32) -> Category {
        Category { name: name.to_owned(), url: format!("/c/{}", name.to_lowercase()), position }
    }

    #[test]
    fn navbar_is_sorted_at_every_level() {
        let input = NavbarInput {
            items: vec![
                NavItem {
                    label: "Sale".to_owned(),
                    url: "/sale".to_owned(),
                    position: 2,
                    highlight: true,
                    mega_menu: None,
                },
                NavItem {
                    label: "Bags".to_owned(),
                    url: "/bags".to_owned(),
                    position: 1,
                    highlight: false,
                    mega_menu: Some(MegaMenu {
                        columns: vec![MegaMenuColumn {
                            title: "By maison".to_owned(),
                            categories: vec![category("Hermes", 2), category("Chanel", 1)],
                            position: 0,
                        }],
                        featured_image_url: None,
                        featured_link: None,
                    }),
                },
            ],
        };

        let navbar = input.into_navbar(atelier_kernel::time::now()).unwrap();
        assert_eq!(navbar.items[0].label, "Bags");
        let names: Vec<&str> = navbar.items[0].mega_menu.as_ref().unwrap().columns[0]
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Chanel", "Hermes"]);
    }

    #[test]
    fn unsupported_category_links_are_rejected() {
        let menu = MegaMenu {
            columns: vec![MegaMenuColumn {
                title: "Shoes".to_owned(),
                categories: vec![Category { name: "Boots".to_owned(), url: "ftp://x".to_owned(), position: 0 }],
                position: 0,
            }],
            featured_image_url: None,
            featured_link: None,
        };
        let err = validate_mega_menu(menu).unwrap_err();
        assert_eq!(err.to_string(), "categories.url must be an http(s) URL or a path starting with /");
    }
}
