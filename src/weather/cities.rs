//! Static lookup of the cities the provider publishes forecasts for

/// Upper-case city name and the slug of its forecast document
const CITIES: [(&str, &str); 15] = [
    ("MOSCOW", "moscow"),
    ("PARIS", "paris"),
    ("LONDON", "london"),
    ("BERLIN", "berlin"),
    ("BEIJING", "beijing"),
    ("KAZAN", "kazan"),
    ("SPETERSBURG", "spetersburg"),
    ("VOLGOGRAD", "volgograd"),
    ("NOVOSIBIRSK", "novosibirsk"),
    ("KALININGRAD", "kalingrad"),
    ("ABUDHABI", "abudhabi"),
    ("WARSZAWA", "warszawa"),
    ("BUCHAREST", "bucharest"),
    ("ROMA", "roma"),
    ("CAIRO", "cairo"),
];

/// Document slug for `city`, matched case-insensitively
#[must_use]
pub fn city_slug(city: &str) -> Option<&'static str> {
    let key = city.trim().to_uppercase();
    CITIES
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, slug)| *slug)
}

/// Lower-case names of every supported city
pub fn known_cities() -> impl Iterator<Item = String> {
    CITIES.iter().map(|(name, _)| name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("moscow", Some("moscow"))]
    #[case("Moscow", Some("moscow"))]
    #[case(" ROMA ", Some("roma"))]
    #[case("kaliningrad", Some("kalingrad"))]
    #[case("1", None)]
    #[case("", None)]
    fn test_city_slug(#[case] city: &str, #[case] expected: Option<&str>) {
        assert_eq!(city_slug(city), expected);
    }

    #[test]
    fn test_known_cities_are_resolvable() {
        for city in known_cities() {
            assert!(city_slug(&city).is_some(), "{city} should resolve");
        }
    }
}
