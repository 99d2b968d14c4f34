//! Demo object graph: an inventory holding a few weapons.

use richstring::{Reflect, RichFormat};

#[derive(Debug, Clone, Reflect)]
#[reflect(rich_format)]
pub struct Weapon {
    pub name: String,
    pub damage: f32,
    #[reflect(rename = "fireRate")]
    pub fire_rate: f32,
}

impl Weapon {
    pub fn new(name: &str, damage: f32, fire_rate: f32) -> Self {
        Self {
            name: name.to_string(),
            damage,
            fire_rate,
        }
    }
}

impl RichFormat for Weapon {
    fn normal_form(&self) -> String {
        format!("Damage: {}", self.damage)
    }

    fn alternate_form(&self) -> String {
        format!("Damage: {}, Fire Rate: {}", self.damage, self.fire_rate)
    }
}

#[derive(Debug, Clone, Reflect)]
#[reflect(property(name = "count", with = "Inventory::count"))]
pub struct Inventory {
    #[reflect(rename = "maxSlots")]
    pub max_slots: u32,
    pub weapons: Vec<Weapon>,
    #[reflect(rename = "mainWeapon")]
    pub main_weapon: Weapon,
}

impl Inventory {
    /// Number of weapons currently carried.
    fn count(&self) -> richstring::Value<'_> {
        richstring::Value::Number(self.weapons.len().into())
    }

    pub fn sample() -> Self {
        Self {
            max_slots: 10,
            weapons: vec![
                Weapon::new("Pistol", 12.0, 2.5),
                Weapon::new("Shotgun", 40.0, 0.5),
                Weapon::new("Rifle", 25.5, 1.25),
            ],
            main_weapon: Weapon::new("Shotgun", 40.0, 0.5),
        }
    }
}
