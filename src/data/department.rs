//! Static department data
//!
//! The five departments whose schedules can be fetched, in the order the remote
//! endpoint numbers them.

use super::Department;

/// Static array of all known departments
///
/// `index` matches the `svidID` query parameter of the schedule endpoint.
pub static DEPARTMENTS: [Department; 5] = [
    Department {
        name: "Félagsvísindasvið",
        slug: "felagsvisindasvid",
        index: 1,
    },
    Department {
        name: "Heilbrigðisvísindasvið",
        slug: "heilbrigdisvisindasvid",
        index: 2,
    },
    Department {
        name: "Hugvísindasvið",
        slug: "hugvisindasvid",
        index: 3,
    },
    Department {
        name: "Menntavísindasvið",
        slug: "menntavisindasvid",
        index: 4,
    },
    Department {
        name: "Verkfræði- og náttúruvísindasvið",
        slug: "verkfraedi-og-natturuvisindasvid",
        index: 5,
    },
];

/// Returns all known departments
pub fn all_departments() -> &'static [Department] {
    &DEPARTMENTS
}

/// Get a department by its slug
///
/// # Example
///
/// ```
/// use proftafla::data::department::get_department_by_slug;
///
/// let department = get_department_by_slug("hugvisindasvid").unwrap();
/// assert_eq!(department.index, 3);
/// ```
pub fn get_department_by_slug(slug: &str) -> Option<&'static Department> {
    DEPARTMENTS.iter().find(|department| department.slug == slug)
}
