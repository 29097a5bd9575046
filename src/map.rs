use anyhow::{anyhow, Context, Result};
use glam::Vec3;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};

use crate::entity::{Entity, EntityClass};
use crate::environment::{Climate, Weather};
use crate::session::Session;

/// Parsed map file: world-wide settings plus the entity placements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MapDefinition {
    pub climate: Option<Climate>,
    pub weather: Option<Weather>,
    pub entities: Vec<EntityDef>,
}

/// One entity placement as described by the map file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityDef {
    pub class: EntityClass,
    pub id: i64,
    pub entity_type: i64,
    pub health: f64,
    pub max_weight: f64,
    pub scale: Vec3,
    pub position: Vec3,
    pub sway: Sway,
}

/// Wind sway animation parameters for vegetation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sway {
    pub speed: f64,
    pub power: f64,
}

impl MapDefinition {
    /// Parses the XML map format produced by the editor tooling.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("invalid map XML")?;
        let root = document.root_element();
        if !root.has_tag_name("map") {
            return Err(anyhow!("expected <map> root element"));
        }

        let climate = match optional_text(&root, "climate") {
            Some(text) => Some(parse_climate(&text)?),
            None => None,
        };
        let weather = match optional_text(&root, "weather") {
            Some(text) => Some(parse_weather(&text)?),
            None => None,
        };

        let mut entities = Vec::new();
        for node in root.children().filter(Node::is_element) {
            let class = match node.tag_name().name() {
                "object" => EntityClass::Object,
                "unit" => EntityClass::Unit,
                "item" => EntityClass::Item,
                "info" => EntityClass::Info,
                _ => continue,
            };
            entities.push(parse_entity(&node, class)?);
        }

        Ok(Self {
            climate,
            weather,
            entities,
        })
    }

    /// Fills the session stores from this definition. Mesh handles are
    /// attached later, when the external asset loader reports back.
    pub fn populate(&self, session: &Session) {
        if let Some(climate) = self.climate {
            session.environment().set_climate(climate);
        }
        if let Some(weather) = self.weather {
            session.environment().set_weather(weather);
        }
        for def in &self.entities {
            let mut entity = Entity::new(def.class, def.id);
            entity.entity_type = def.entity_type;
            entity.health = def.health;
            session.entities().insert(entity);
        }
    }
}

fn parse_entity(node: &Node<'_, '_>, class: EntityClass) -> Result<EntityDef> {
    let id = required_text(node, "id")?
        .parse::<i64>()
        .with_context(|| format!("invalid id for <{}>", class.collection_name()))?;
    let entity_type = parse_i64(optional_text(node, "type"), 0)?;
    let health = parse_f64(optional_text(node, "health"), 0.0)?;
    let max_weight = parse_f64(optional_text(node, "maxweight"), 25000.0)?;
    let scale = parse_vec3(optional_text(node, "scale"), Vec3::ONE)?;
    let position = parse_vec3(optional_text(node, "position"), Vec3::ZERO)?;

    let mut sway = Sway::default();
    if let Some(sway_node) = node.children().find(|child| child.has_tag_name("sway")) {
        sway.speed = parse_f64(optional_text(&sway_node, "speed"), 0.0)?;
        sway.power = parse_f64(optional_text(&sway_node, "power"), 0.0)?;
    }

    Ok(EntityDef {
        class,
        id,
        entity_type,
        health,
        max_weight,
        scale,
        position,
        sway,
    })
}

fn parse_climate(text: &str) -> Result<Climate> {
    let raw = text
        .parse::<i64>()
        .with_context(|| format!("invalid climate `{text}`"))?;
    Climate::from_raw(raw).ok_or_else(|| anyhow!("climate {raw} out of range"))
}

fn parse_weather(text: &str) -> Result<Weather> {
    let raw = text
        .parse::<i64>()
        .with_context(|| format!("invalid weather `{text}`"))?;
    Weather::from_raw(raw).ok_or_else(|| anyhow!("weather {raw} out of range"))
}

fn required_text(node: &Node<'_, '_>, tag: &str) -> Result<String> {
    optional_text(node, tag).ok_or_else(|| anyhow!("<{tag}> tag is missing"))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    node.children()
        .find(|child| child.has_tag_name(tag))
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_i64(value: Option<String>, default: i64) -> Result<i64> {
    match value {
        Some(value) => value
            .parse::<i64>()
            .map_err(|err| anyhow!("failed to parse integer: {err}")),
        None => Ok(default),
    }
}

fn parse_f64(value: Option<String>, default: f64) -> Result<f64> {
    match value {
        Some(value) => value
            .parse::<f64>()
            .map_err(|err| anyhow!("failed to parse float: {err}")),
        None => Ok(default),
    }
}

fn parse_vec3(value: Option<String>, default: Vec3) -> Result<Vec3> {
    let Some(value) = value else {
        return Ok(default);
    };
    let mut numbers = value
        .split_whitespace()
        .filter_map(|component| component.parse::<f32>().ok());
    let x = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let y = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    let z = numbers
        .next()
        .ok_or_else(|| anyhow!("vector is missing components"))?;
    Ok(Vec3::new(x, y, z))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRef;

    const SAMPLE: &str = r#"
    <map>
        <climate>2</climate>
        <weather>0</weather>
        <unit>
            <id>1</id>
            <type>7</type>
            <health>100</health>
            <position>4 0 -12</position>
        </unit>
        <object>
            <id>1</id>
            <type>3</type>
            <scale>1 2 1</scale>
            <sway>
                <speed>0.4</speed>
                <power>1.5</power>
            </sway>
        </object>
        <item>
            <id>5</id>
        </item>
    </map>
    "#;

    #[test]
    fn parses_entities_and_world_settings() {
        let map = MapDefinition::from_xml(SAMPLE).unwrap();
        assert_eq!(map.climate, Some(Climate::Sun));
        assert_eq!(map.weather, Some(Weather::Sun));
        assert_eq!(map.entities.len(), 3);

        let unit = &map.entities[0];
        assert_eq!(unit.class, EntityClass::Unit);
        assert_eq!(unit.health, 100.0);
        assert_eq!(unit.position, Vec3::new(4.0, 0.0, -12.0));

        let object = &map.entities[1];
        assert_eq!(object.scale, Vec3::new(1.0, 2.0, 1.0));
        assert_eq!(object.sway.power, 1.5);

        let item = &map.entities[2];
        assert_eq!(item.max_weight, 25000.0);
    }

    #[test]
    fn missing_id_is_an_error() {
        let bad = "<map><unit><type>1</type></unit></map>";
        assert!(MapDefinition::from_xml(bad).is_err());
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(MapDefinition::from_xml("<scene></scene>").is_err());
    }

    #[test]
    fn populate_fills_the_session() {
        let map = MapDefinition::from_xml(SAMPLE).unwrap();
        let session = Session::new();
        map.populate(&session);

        assert_eq!(session.environment().climate(), Climate::Sun);
        let unit = session
            .entities()
            .lookup(EntityRef::new(EntityClass::Unit, 1))
            .unwrap();
        assert_eq!(unit.health, 100.0);
        assert_eq!(unit.entity_type, 7);
        assert_eq!(session.entities().total(), 3);
    }
}
