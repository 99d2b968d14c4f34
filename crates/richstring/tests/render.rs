//! End-to-end tests: derive a registry, bind templates and render them.

use std::cell::{Cell, RefCell};
use std::io::Write;

use richstring::{
    Config, Diagnostic, ErrorPolicy, Output, Phase, Reflect, RichFormat, RichStringError, Settings,
    Template, TransformTable, Value,
};

#[derive(Reflect)]
#[reflect(rich_format)]
struct Weapon {
    name: String,
    damage: u32,
    fire_rate: f32,
}

impl RichFormat for Weapon {
    fn normal_form(&self) -> String {
        format!("Damage: {}", self.damage)
    }

    fn alternate_form(&self) -> String {
        format!("Damage: {}, Fire Rate: {}", self.damage, self.fire_rate)
    }
}

#[derive(Reflect)]
struct Item {
    name: String,
}

#[derive(Reflect)]
#[reflect(property(name = "itemCount", with = "Hero::item_count"))]
struct Hero {
    name: String,
    weapon: Weapon,
    items: Vec<Item>,
    gold: Cell<u32>,
    title: RefCell<String>,
    #[reflect(skip)]
    #[allow(dead_code)]
    secret: String,
}

impl Hero {
    fn item_count(&self) -> Value<'_> {
        Value::Number(self.items.len().into())
    }
}

fn item(name: &str) -> Item {
    Item {
        name: name.to_string(),
    }
}

fn hero() -> Hero {
    Hero {
        name: "Sword".to_string(),
        weapon: Weapon {
            name: "Blade".to_string(),
            damage: 10,
            fire_rate: 1.5,
        },
        items: vec![item("Rope"), item("Torch"), item("Potion")],
        gold: Cell::new(10),
        title: RefCell::new("Squire".to_string()),
        secret: "hidden".to_string(),
    }
}

fn lenient() -> std::sync::Arc<Config> {
    Config::builder()
        .policy(ErrorPolicy::Lenient)
        .build()
        .unwrap()
}

fn render(raw: &str, root: &Hero) -> Result<String, RichStringError> {
    let config = Config::markup();
    Template::bound(raw, root, &config)?.render(false)
}

#[test]
fn single_member() {
    assert_eq!(render("{name}", &hero()).unwrap(), "Sword");
}

#[test]
fn chained_member() {
    assert_eq!(render("{weapon.damage}", &hero()).unwrap(), "10");
}

#[test]
fn indexed_then_chained() {
    assert_eq!(render("{items->2.name}", &hero()).unwrap(), "Potion");
}

#[test]
fn indexed_last_link() {
    let root = hero();
    let config = Config::markup();
    let template = Template::bound("{items->1}", &root, &config).unwrap();
    assert!(template.references()[0].is_indexed());
    assert_eq!(template.references()[0].index(), Some(1));
    assert_eq!(template.render(false).unwrap(), "Item");
}

#[test]
fn computed_property() {
    assert_eq!(render("{itemCount} items", &hero()).unwrap(), "3 items");
}

#[test]
fn skipped_fields_are_not_members() {
    assert_eq!(
        render("{secret}", &hero()).unwrap_err(),
        RichStringError::MemberNotFound {
            member: "secret".to_string(),
            type_name: "Hero",
        }
    );
}

#[test]
fn out_of_range_index_strict() {
    assert_eq!(
        render("{items->5}", &hero()).unwrap_err(),
        RichStringError::IndexOutOfRange {
            member: "items".to_string(),
            index: 5,
            len: 3,
        }
    );
}

#[test]
fn out_of_range_index_while_binding() {
    let root = hero();
    let config = Config::markup();
    let mut template = Template::new("{items->7.name}", &config);
    let err = template.bind(&root).unwrap_err();
    assert!(matches!(err, RichStringError::IndexOutOfRange { index: 7, .. }));
    assert!(!template.is_bound());
}

#[test]
fn out_of_range_index_lenient() {
    let root = hero();
    let config = lenient();
    let template = Template::bound("[{items->5}] {items->7.name}!", &root, &config).unwrap();

    assert_eq!(template.diagnostics().len(), 1);
    assert_eq!(template.diagnostics()[0].phase, Phase::Bind);

    let rendered = template.render_report(false).unwrap();
    assert_eq!(rendered.diagnostics.len(), 2);
    assert_eq!(rendered.diagnostics[0].phase, Phase::Render);
    assert!(matches!(
        rendered.diagnostics[0].error,
        RichStringError::IndexOutOfRange { index: 5, .. }
    ));
    assert!(matches!(
        rendered.diagnostics[1].error,
        RichStringError::MissingDirective { .. }
    ));
    assert_eq!(rendered.text, " !");
}

#[test]
fn resolution_errors() {
    let root = hero();

    assert!(matches!(
        render("{name.length}", &root).unwrap_err(),
        RichStringError::NotNavigable { found: "text", .. }
    ));
    assert!(matches!(
        render("{name->0}", &root).unwrap_err(),
        RichStringError::NotIndexable { index: 0, .. }
    ));
    assert!(matches!(
        render("{weapon..damage}", &root).unwrap_err(),
        RichStringError::MalformedReference { .. }
    ));
    assert_eq!(
        render("{weapon.speed}", &root).unwrap_err(),
        RichStringError::MemberNotFound {
            member: "speed".to_string(),
            type_name: "Weapon",
        }
    );
}

#[test]
fn directive_composition() {
    assert_eq!(render("[Hello:b]", &hero()).unwrap(), "<b>Hello</b>");
    assert_eq!(render("[Hi:b:u]", &hero()).unwrap(), "<u><b>Hi</b></u>");
    assert_eq!(
        render("[{name}:i] strikes", &hero()).unwrap(),
        "<i>Sword</i> strikes"
    );
}

#[test]
fn substituted_values_can_form_directives() {
    let mut root = hero();
    root.name = "[Boss:b]".to_string();
    assert_eq!(render("{name}", &root).unwrap(), "<b>Boss</b>");
}

#[test]
fn spans_do_not_cross_lines() {
    assert_eq!(render("{na\nme} [a\n:b]", &hero()).unwrap(), "{na\nme} [a\n:b]");
}

#[test]
fn text_without_spans_is_unchanged() {
    assert_eq!(render("plain text, no spans", &hero()).unwrap(), "plain text, no spans");
}

#[test]
fn rendering_is_idempotent() {
    let root = hero();
    let config = Config::markup();
    let raw = "[{weapon.name}:b] hits for {weapon.damage}";
    let template = Template::bound(raw, &root, &config).unwrap();

    let first = template.render(false).unwrap();
    let second = template.render(false).unwrap();
    assert_eq!(first, "<b>Blade</b> hits for 10");
    assert_eq!(first, second);
    assert_eq!(template.raw_text(), raw);
}

#[test]
fn alternate_form() {
    let root = hero();
    let config = Config::markup();
    let template = Template::bound("{weapon}", &root, &config).unwrap();
    assert_eq!(template.render(false).unwrap(), "Damage: 10");
    assert_eq!(template.render(true).unwrap(), "Damage: 10, Fire Rate: 1.5");
}

#[test]
fn objects_without_rich_format_use_type_name() {
    assert_eq!(render("{items->0}", &hero()).unwrap(), "Item");
}

#[test]
fn repeated_tokens_resolve_once() {
    let root = hero();
    let config = Config::markup();
    let template = Template::bound("{name} and {name} and {gold}", &root, &config).unwrap();
    assert_eq!(template.references().len(), 2);
    assert_eq!(template.render(false).unwrap(), "Sword and Sword and 10");
}

#[test]
fn unknown_key_strict() {
    assert_eq!(
        render("[Hi:sparkle]", &hero()).unwrap_err(),
        RichStringError::UnknownActionKey {
            key: "sparkle".to_string(),
            span: "[Hi:sparkle]".to_string(),
        }
    );
}

#[test]
fn unknown_key_lenient() {
    let root = hero();
    let config = lenient();
    let template = Template::bound("[Hi:sparkle:b]", &root, &config).unwrap();
    let rendered = template.render_report(false).unwrap();

    assert_eq!(rendered.text, "<b>Hi</b>");
    assert_eq!(
        rendered.diagnostics,
        vec![Diagnostic {
            phase: Phase::Render,
            error: RichStringError::UnknownActionKey {
                key: "sparkle".to_string(),
                span: "[Hi:sparkle:b]".to_string(),
            },
        }]
    );
}

#[test]
fn first_matching_key_wins() {
    let root = hero();
    let config = Config::builder()
        .transforms(
            TransformTable::new()
                .with("x", |t| format!("first({t})"))
                .with("x", |t| format!("second({t})")),
        )
        .build()
        .unwrap();
    let template = Template::bound("[a:x]", &root, &config).unwrap();
    assert_eq!(template.render(false).unwrap(), "first(a)");
}

#[test]
fn live_values_are_fetched_on_every_render() {
    let root = hero();
    let config = Config::markup();
    let template = Template::bound("{title} with {gold} gold", &root, &config).unwrap();
    assert_eq!(template.render(false).unwrap(), "Squire with 10 gold");

    root.gold.set(25);
    root.title.replace("Knight".to_string());
    assert_eq!(template.render(false).unwrap(), "Knight with 25 gold");
}

#[test]
fn rebinding_replaces_the_root() {
    let first = hero();
    let mut second = hero();
    second.name = "Axe".to_string();

    let config = Config::markup();
    let mut template = Template::new("{name}", &config);
    template.bind(&first).unwrap();
    assert_eq!(template.render(false).unwrap(), "Sword");

    template.bind(&second).unwrap();
    assert_eq!(template.render(false).unwrap(), "Axe");
}

#[test]
fn unbound_template_cannot_render() {
    let config = Config::markup();
    let template = Template::new("{name}", &config);
    assert!(!template.is_bound());
    assert_eq!(template.render(false).unwrap_err(), RichStringError::Unbound);
}

#[test]
fn settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r##"
policy: lenient
delimiters:
  chain: "/"
  reference: {{ open: "${{", close: "}}" }}
keys:
  bold: strong
colors:
  - {{ key: hot, color: "#f00" }}
"##
    )
    .unwrap();

    let config = Settings::from_file(file.path())
        .unwrap()
        .into_config(Output::Markup)
        .unwrap();
    assert_eq!(config.policy(), ErrorPolicy::Lenient);

    let root = hero();
    let template = Template::bound("[${weapon/name}:strong:hot] {name}", &root, &config).unwrap();
    assert_eq!(
        template.render(false).unwrap(),
        "<color=#FF0000><b>Blade</b></color> {name}"
    );
}

#[test]
fn ansi_output() {
    let root = hero();
    let config = Config::builder()
        .transforms(TransformTable::ansi())
        .build()
        .unwrap();
    let template = Template::bound("[{name}:b]", &root, &config).unwrap();
    let text = template.render(false).unwrap();
    assert!(text.starts_with("\u{1b}["));
    assert!(text.contains("Sword"));
    assert!(!text.contains("<b>"));
}

#[derive(Reflect)]
struct Gauge {
    ratio: f32,
    rate: Cell<f32>,
    precise: f64,
    armed: Cell<bool>,
    grade: Cell<char>,
}

#[test]
fn floats_render_at_their_own_width() {
    let gauge = Gauge {
        ratio: 0.1,
        rate: Cell::new(2.3),
        precise: 0.1,
        armed: Cell::new(false),
        grade: Cell::new('A'),
    };
    let config = Config::markup();
    let template = Template::bound("{ratio}|{rate}|{precise}", &gauge, &config).unwrap();
    assert_eq!(template.render(false).unwrap(), "0.1|2.3|0.1");

    gauge.rate.set(0.7);
    assert_eq!(template.render(false).unwrap(), "0.1|0.7|0.1");
}

#[test]
fn flag_and_char_cells_are_live() {
    let gauge = Gauge {
        ratio: 1.0,
        rate: Cell::new(1.0),
        precise: 1.0,
        armed: Cell::new(false),
        grade: Cell::new('A'),
    };
    let config = Config::markup();
    let template = Template::bound("{armed}/{grade}", &gauge, &config).unwrap();
    assert_eq!(template.render(false).unwrap(), "false/A");

    gauge.armed.set(true);
    gauge.grade.set('S');
    assert_eq!(template.render(false).unwrap(), "true/S");
}

#[test]
fn directive_base_text_comes_first() {
    assert_eq!(
        render("[b:Hello]", &hero()).unwrap_err(),
        RichStringError::UnknownActionKey {
            key: "Hello".to_string(),
            span: "[b:Hello]".to_string(),
        }
    );
}
