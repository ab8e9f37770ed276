use serde::Deserialize;

/// One record of the superhero list.
///
/// Every field is required: a payload missing any of them fails to decode as a
/// whole. Fields the endpoint carries beyond these are ignored.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Hero {
    pub name: String,
    pub biography: Biography,
    pub powerstats: PowerStats,
    pub images: HeroImage,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Biography {
    pub full_name: String,
    pub place_of_birth: String,
    pub alignment: String,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PowerStats {
    pub intelligence: i64,
    pub strength: i64,
    pub speed: i64,
    pub durability: i64,
    pub power: i64,
    pub combat: i64,
}

impl PowerStats {
    /// Label/value pairs in display order.
    pub fn entries(&self) -> [(&'static str, i64); 6] {
        [
            ("Intelligence", self.intelligence),
            ("Strength", self.strength),
            ("Speed", self.speed),
            ("Durability", self.durability),
            ("Power", self.power),
            ("Combat", self.combat),
        ]
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct HeroImage {
    pub sm: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn hero(name: &str) -> Hero {
        Hero {
            name: name.to_string(),
            biography: Biography {
                full_name: format!("{name} Full"),
                place_of_birth: "Earth".to_string(),
                alignment: "good".to_string(),
            },
            powerstats: PowerStats {
                intelligence: 50,
                strength: 60,
                speed: 70,
                durability: 80,
                power: 90,
                combat: 100,
            },
            images: HeroImage {
                sm: format!("https://example.com/{name}.jpg"),
            },
        }
    }

    #[test]
    fn entries_follow_display_order() {
        let stats = hero("a").powerstats;
        let names: Vec<&str> = stats.entries().iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            ["Intelligence", "Strength", "Speed", "Durability", "Power", "Combat"]
        );
        assert_eq!(stats.entries()[5].1, 100);
    }

    #[test]
    fn biography_uses_camel_case_keys() {
        let bio: Biography = serde_json::from_str(
            r#"{"fullName":"Bruce Wayne","placeOfBirth":"Gotham City","alignment":"good"}"#,
        )
        .unwrap();
        assert_eq!(bio.full_name, "Bruce Wayne");
        assert_eq!(bio.place_of_birth, "Gotham City");
    }
}
