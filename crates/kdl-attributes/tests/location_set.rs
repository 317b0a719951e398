//! Geographic location sets where a base's `Code` and `ID` are mandatory:
//!
//! ```kdl
//! Imput {
//!     LocationSet {
//!         BaseSet { Base { Code "B1"; ID "alpha"; ... } }
//!         PlatformSet { Platform { ... }; Platform { ... } }
//!     }
//! }
//! ```

use kdl_attributes::{
    AttrError, AttributeBag, DocumentError, ErrorPolicy, KdlNode, KdlNodeExt, MandatoryFields,
    Serializable, TreeConfig, load_object, parse_str, save_object, to_kdl_string,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn geo_attrs() -> AttributeBag {
    AttributeBag::new()
        .declare("Code", "0")
        .declare("ID", "")
        .declare("LatitudeDegree", 0i32)
        .declare("LatitudeMinute", 0i32)
        .declare("LatitudeSecond", 0.0f32)
        .declare("LatitudeCP", "N")
        .declare("LongitudeDegree", 0i32)
        .declare("LongitudeMinute", 0i32)
        .declare("LongitudeSecond", 0.0f32)
        .declare("LongitudeCP", "E")
}

#[derive(Debug, Clone)]
struct Base {
    attrs: AttributeBag,
    required: MandatoryFields,
}

impl Default for Base {
    fn default() -> Self {
        Self {
            attrs: geo_attrs(),
            required: MandatoryFields::new(["Code", "ID"]),
        }
    }
}

impl ErrorPolicy for Base {
    fn on_deserialize_error(&self, key: &str, error: &AttrError) -> Result<(), AttrError> {
        self.required.check(key, error)
    }
}

impl Serializable for Base {
    fn attributes(&self) -> &AttributeBag {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attrs
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Platform {
    attrs: AttributeBag,
}

impl Default for Platform {
    fn default() -> Self {
        Self { attrs: geo_attrs() }
    }
}

impl ErrorPolicy for Platform {}

impl Serializable for Platform {
    fn attributes(&self) -> &AttributeBag {
        &self.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.attrs
    }
}

#[derive(Debug, Clone)]
struct LocationSet {
    base: Base,
    platforms: Vec<Platform>,
}

impl LocationSet {
    fn new(base: Base, platforms: Vec<Platform>) -> Self {
        Self { base, platforms }
    }
}

impl Default for LocationSet {
    fn default() -> Self {
        Self::new(Base::default(), Vec::new())
    }
}

impl ErrorPolicy for LocationSet {}

// Exposes the base's bag. Wrapping nodes and platforms are written by hand.
impl Serializable for LocationSet {
    fn attributes(&self) -> &AttributeBag {
        &self.base.attrs
    }

    fn attributes_mut(&mut self) -> &mut AttributeBag {
        &mut self.base.attrs
    }

    fn serialize(&self, node: &mut KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        let mut complete = true;
        let base = node.ensure_child("BaseSet").append_child("Base");
        complete &= self.base.serialize(base, config)?;

        let platform_set = node.ensure_child("PlatformSet");
        for platform in &self.platforms {
            let child = platform_set.append_child("Platform");
            complete &= platform.serialize(child, config)?;
        }
        Ok(complete)
    }

    fn deserialize(&mut self, node: &KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        let mut complete = true;
        match node.child("BaseSet").and_then(|set| set.child("Base")) {
            Some(base) => complete &= self.base.deserialize(base, config)?,
            None => complete = false,
        }

        if let Some(set) = node.child("PlatformSet") {
            let mut platforms = Vec::new();
            for child in set.children_named("Platform") {
                let mut platform = Platform::default();
                complete &= platform.deserialize(child, config)?;
                platforms.push(platform);
            }
            self.platforms = platforms;
        }
        Ok(complete)
    }
}

#[derive(Debug, Clone, Default)]
struct Imput {
    location_set: LocationSet,
}

impl ErrorPolicy for Imput {}

impl Serializable for Imput {
    fn attributes(&self) -> &AttributeBag {
        self.location_set.attributes()
    }

    fn attributes_mut(&mut self) -> &mut AttributeBag {
        self.location_set.attributes_mut()
    }

    fn serialize(&self, node: &mut KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        self.location_set
            .serialize(node.ensure_child("LocationSet"), config)
    }

    fn deserialize(&mut self, node: &KdlNode, config: &TreeConfig) -> Result<bool, AttrError> {
        match node.child("LocationSet") {
            Some(child) => self.location_set.deserialize(child, config),
            None => Ok(false),
        }
    }
}

fn located(code: &str, id: &str, lat: (i32, i32, f32), cp: &str) -> AttributeBag {
    let mut attrs = geo_attrs();
    attrs.set("Code", code).unwrap();
    attrs.set("ID", id).unwrap();
    attrs.set("LatitudeDegree", lat.0).unwrap();
    attrs.set("LatitudeMinute", lat.1).unwrap();
    attrs.set("LatitudeSecond", lat.2).unwrap();
    attrs.set("LatitudeCP", cp).unwrap();
    attrs
}

fn sample() -> Imput {
    let mut base = Base::default();
    base.attrs = located("B1", "alpha", (48, 51, 24.5), "N");
    let platforms = vec![
        Platform {
            attrs: located("P1", "bravo", (33, 52, 4.25), "S"),
        },
        Platform {
            attrs: located("P2", "charlie", (1, 17, 0.0), "N"),
        },
    ];
    Imput {
        location_set: LocationSet::new(base, platforms),
    }
}

#[test]
fn location_set_survives_a_file_round_trip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("imput.kdl");
    let imput = sample();
    assert!(save_object(&path, "Imput", &imput, &TreeConfig::default()).unwrap());

    let mut loaded = Imput::default();
    assert!(load_object(&path, "Imput", &mut loaded, &TreeConfig::default()).unwrap());
    assert_eq!(loaded.location_set.base.attrs, imput.location_set.base.attrs);
    assert_eq!(loaded.location_set.platforms, imput.location_set.platforms);
    assert_eq!(
        loaded.location_set.platforms[0]
            .get::<f32>("LatitudeSecond")
            .unwrap(),
        4.25
    );
}

#[test]
fn rendered_layout_wraps_base_and_platforms() {
    let rendered = to_kdl_string(&sample(), "Imput", &TreeConfig::default()).unwrap();
    let doc = kdl_attributes::parse_document(&rendered).unwrap();
    let set = doc.get("Imput").unwrap().child("LocationSet").unwrap();
    let base = set.child("BaseSet").unwrap().child("Base").unwrap();
    assert_eq!(base.child("ID").unwrap().text().as_deref(), Some("alpha"));
    assert_eq!(
        set.child("PlatformSet")
            .unwrap()
            .children_named("Platform")
            .count(),
        2
    );
}

#[test]
fn missing_mandatory_id_aborts_the_load() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.kdl");
    std::fs::write(
        &path,
        "Imput { LocationSet { BaseSet { Base { Code \"B1\"; LatitudeCP \"S\" } } } }",
    )
    .unwrap();

    let mut loaded = Imput::default();
    let err = load_object(&path, "Imput", &mut loaded, &TreeConfig::default()).unwrap_err();
    match err {
        DocumentError::Attribute(err) => {
            assert!(err.is_mandatory());
            assert_eq!(err.key.as_deref(), Some("ID"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    // Base is only updated once every mandatory field has been read.
    assert_eq!(
        loaded.location_set.base.get::<String>("LatitudeCP").unwrap(),
        "N"
    );
}

#[test]
fn missing_optional_field_keeps_its_default() {
    init_tracing();
    let mut loaded = Imput::default();
    let complete = parse_str(
        "Imput { LocationSet { BaseSet { Base { Code \"B1\"; ID \"alpha\"; LatitudeDegree \"12\" } } } }",
        "Imput",
        &mut loaded,
        &TreeConfig::default(),
    )
    .unwrap();
    assert!(!complete);

    let base = &loaded.location_set.base;
    assert_eq!(base.get::<String>("ID").unwrap(), "alpha");
    assert_eq!(base.get::<i32>("LatitudeDegree").unwrap(), 12);
    assert_eq!(base.get::<String>("LongitudeCP").unwrap(), "E");
    assert_eq!(base.get::<f32>("LongitudeSecond").unwrap(), 0.0);
}

#[test]
fn malformed_platform_number_is_not_fatal() {
    init_tracing();
    let mut loaded = Imput::default();
    let complete = parse_str(
        "Imput { LocationSet { \
            BaseSet { Base { Code \"B1\"; ID \"alpha\" } }; \
            PlatformSet { Platform { Code \"P1\"; LatitudeMinute \"abc\" } } \
        } }",
        "Imput",
        &mut loaded,
        &TreeConfig::default(),
    )
    .unwrap();
    assert!(!complete);
    let platforms = &loaded.location_set.platforms;
    assert_eq!(platforms.len(), 1);
    assert_eq!(platforms[0].get::<String>("Code").unwrap(), "P1");
    assert_eq!(platforms[0].get::<i32>("LatitudeMinute").unwrap(), 0);
}
