use cafe_site::lang::TextDirection;
use cafe_site::reveal::IntersectionSample;
use cafe_site::tilt::Rect;
use cafe_site::{
    Language, MemoryPage, MemoryStore, MenuData, NodeId, Site, SiteConfig, SiteEvent, Surface,
    Target,
};

const ONE_CATEGORY: &str = r#"[
    {
        "categoryId": "cold-brew",
        "categoryNameEn": "Cold Brew",
        "categoryNameAr": "قهوة باردة",
        "items": [
            { "nameEn": "Classic", "nameAr": "كلاسيك", "price": "15 SAR" },
            { "nameEn": "Vanilla <em>Cream</em>", "nameAr": "فانيلا كريم", "price": "19 SAR" }
        ]
    }
]"#;

fn load(store: MemoryStore) -> (Site<MemoryStore>, MemoryPage) {
    let mut site = Site::new(SiteConfig::default(), store);
    let mut page = MemoryPage::new().with_menu_grid();
    page.add_text("Welcome", Some("أهلاً"));
    page.add_text("Our <br>Story", Some("قصتنا"));
    page.add_text("Espresso Bar", None);

    let ops = site.start(0.0);
    page.apply_all(&ops);
    (site, page)
}

fn dispatch(site: &mut Site<MemoryStore>, page: &mut MemoryPage, event: SiteEvent) {
    site.dispatch(page, event);
}

#[test]
fn first_load_without_preference_is_english_ltr() {
    let (site, page) = load(MemoryStore::new());
    assert_eq!(site.language(), Language::En);
    assert_eq!(page.document_lang(), Some(Language::En));
    assert_eq!(page.document_dir(), Some(TextDirection::Ltr));
    assert!(page.has_class(Target::LangEnButton, "active"));
    assert!(!page.has_class(Target::LangArButton, "active"));
    assert!(page.shows_language(Language::En));
    assert_eq!(site.switcher().store().get("siteLang"), None);
}

#[test]
fn stored_arabic_renders_rtl_without_click() {
    let (site, page) = load(MemoryStore::with("siteLang", "ar"));
    assert_eq!(site.language(), Language::Ar);
    assert_eq!(page.document_dir(), Some(TextDirection::Rtl));
    assert!(page.has_class(Target::LangArButton, "active"));
    assert_eq!(page.text(0).content, "أهلاً");
    // no Arabic string: left as authored
    assert_eq!(page.text(2).content, "Espresso Bar");
    assert!(page.shows_language(Language::Ar));
}

#[test]
fn menu_renders_one_container_with_two_rows() {
    let (mut site, mut page) = load(MemoryStore::new());
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();

    assert_eq!(site.render_menu(&mut page, Some(&data)), 1);

    let menu = page.menu();
    assert_eq!(menu.len(), 1);
    let rows: Vec<_> = menu[0]
        .children
        .iter()
        .filter(|c| c.has_class("menu-item"))
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].children[0].children[1].content, "15 SAR");
    assert_eq!(rows[1].children[0].children[1].content, "19 SAR");

    let row_ids = page.nodes_with_class("menu-item");
    assert_eq!(row_ids.len(), 2);
    for id in row_ids {
        assert!(site.reveal().is_observed(&id));
        assert!(page.is_observing(id));
    }
}

#[test]
fn menu_renders_at_most_once() {
    let (mut site, mut page) = load(MemoryStore::new());
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();
    site.render_menu(&mut page, Some(&data));
    assert_eq!(site.render_menu(&mut page, Some(&data)), 0);
    assert_eq!(page.menu().len(), 1);
}

#[test]
fn menu_without_container_or_data_is_skipped() {
    let mut site = Site::new(SiteConfig::default(), MemoryStore::new());
    let mut bare = MemoryPage::new();
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();
    assert_eq!(site.render_menu(&mut bare, Some(&data)), 0);
    assert_eq!(site.reveal().observed_count(), 0);

    let mut page = MemoryPage::new().with_menu_grid();
    assert_eq!(site.render_menu(&mut page, None), 0);
    assert!(page.menu().is_empty());
}

#[test]
fn menu_follows_current_language_and_later_switches() {
    let (mut site, mut page) = load(MemoryStore::with("siteLang", "ar"));
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();
    site.render_menu(&mut page, Some(&data));
    assert_eq!(page.menu()[0].children[0].content, "قهوة باردة");
    assert!(page.shows_language(Language::Ar));

    dispatch(&mut site, &mut page, SiteEvent::LanguageToggleClicked);
    assert_eq!(site.language(), Language::En);
    assert!(page.shows_language(Language::En));
    assert_eq!(page.menu()[0].children[0].content, "Cold Brew");
}

#[test]
fn language_round_trip_restores_english() {
    let (mut site, mut page) = load(MemoryStore::new());
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();
    site.render_menu(&mut page, Some(&data));

    let ops = site.set_language(Language::Ar);
    page.apply_all(&ops);
    let ops = site.set_language(Language::En);
    page.apply_all(&ops);

    assert_eq!(page.text(0).content, "Welcome");
    assert_eq!(page.text(1).content, "Our <br>Story");
    assert!(page.shows_language(Language::En));
    assert_eq!(site.switcher().store().get("siteLang"), Some("en"));
}

#[test]
fn switching_twice_to_same_language_is_idempotent() {
    let (mut site, mut page) = load(MemoryStore::new());
    let ops = site.set_language(Language::Ar);
    page.apply_all(&ops);
    let once: Vec<String> = (0..3).map(|i| page.text(i).content.clone()).collect();

    let ops = site.set_language(Language::Ar);
    page.apply_all(&ops);
    let twice: Vec<String> = (0..3).map(|i| page.text(i).content.clone()).collect();

    assert_eq!(once, twice);
    assert_eq!(page.document_dir(), Some(TextDirection::Rtl));
}

#[test]
fn navbar_tracks_every_scroll_event() {
    let (mut site, mut page) = load(MemoryStore::new());
    for (scroll_y, scrolled) in [(10.0, false), (51.0, true), (50.0, false), (400.0, true)] {
        dispatch(&mut site, &mut page, SiteEvent::Scrolled { scroll_y });
        assert_eq!(page.has_class(Target::Navbar, "scrolled"), scrolled);
    }
}

#[test]
fn mobile_menu_closes_on_link() {
    let (mut site, mut page) = load(MemoryStore::new());
    dispatch(&mut site, &mut page, SiteEvent::MobileToggleClicked);
    assert!(page.has_class(Target::NavLinks, "active"));
    assert!(page.has_class(Target::MobileToggle, "active"));

    dispatch(&mut site, &mut page, SiteEvent::NavLinkClicked);
    assert!(!page.has_class(Target::NavLinks, "active"));
    assert!(!page.has_class(Target::MobileToggle, "active"));
}

#[test]
fn authored_reveal_targets_stay_active() {
    let (mut site, mut page) = load(MemoryStore::new());
    let hero = page.add_node(&["reveal-up"]);
    let about = page.add_node(&["reveal-left"]);
    let ops = site.observe([hero, about]);
    page.apply_all(&ops);

    dispatch(
        &mut site,
        &mut page,
        SiteEvent::Intersections(vec![(hero, IntersectionSample::new(true, 0.3))]),
    );
    assert!(page.has_class(Target::Node(hero), "active"));
    assert!(!page.is_observing(hero));
    assert!(page.is_observing(about));

    dispatch(
        &mut site,
        &mut page,
        SiteEvent::Intersections(vec![(hero, IntersectionSample::new(false, 0.0))]),
    );
    assert!(page.has_class(Target::Node(hero), "active"));
}

#[test]
fn tilt_leave_clears_transition_after_delay() {
    let (mut site, mut page) = load(MemoryStore::new());
    let photo = page.add_node(&["tilt-effect"]);
    let rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 200.0,
        height: 200.0,
    };

    dispatch(
        &mut site,
        &mut page,
        SiteEvent::PointerMoved {
            node: photo,
            rect,
            client_x: 200.0,
            client_y: 100.0,
        },
    );
    assert_eq!(
        page.style(Target::Node(photo), "transform"),
        Some("perspective(1000px) rotateX(0deg) rotateY(5deg) scale3d(1.02, 1.02, 1.02)")
    );

    dispatch(&mut site, &mut page, SiteEvent::PointerLeft(photo));
    assert_eq!(
        page.style(Target::Node(photo), "transition"),
        Some("transform 0.4s ease-out")
    );

    assert!(page.advance(399).is_empty());
    let due = page.advance(1);
    assert_eq!(due.len(), 1);
    for event in due {
        dispatch(&mut site, &mut page, event);
    }
    assert_eq!(page.style(Target::Node(photo), "transition"), None);
    assert_eq!(
        page.style(Target::Node(photo), "transform"),
        Some("perspective(1000px) rotateX(0) rotateY(0) scale3d(1, 1, 1)")
    );
}

fn run_clip_end(site: &mut Site<MemoryStore>, page: &mut MemoryPage, outcome: Result<(), String>) {
    dispatch(site, page, SiteEvent::VideoEnded);
    assert!(page.has_class(Target::HeroVideo, "fading"));
    assert!(page.advance(799).is_empty());
    for event in page.advance(1) {
        dispatch(site, page, event);
    }
    // still faded until play() settles
    assert!(page.has_class(Target::HeroVideo, "fading"));
    dispatch(site, page, SiteEvent::VideoPlaySettled(outcome));
    assert!(!page.has_class(Target::HeroVideo, "fading"));
}

#[test]
fn carousel_cycles_three_clips_and_wraps() {
    let (mut site, mut page) = load(MemoryStore::new());
    let mut seen = Vec::new();
    for _ in 0..4 {
        run_clip_end(&mut site, &mut page, Ok(()));
        seen.push(page.video_src().unwrap_or_default().to_string());
    }
    assert_eq!(
        seen,
        vec![
            "hazelnut-brew-complete.mp4",
            "vanilla-french-complete.mp4",
            "dark-espresso-shot.mp4",
            "hazelnut-brew-complete.mp4",
        ]
    );
    assert_eq!(page.play_requests(), 4);
}

#[test]
fn blocked_autoplay_does_not_stick_the_fade() {
    let (mut site, mut page) = load(MemoryStore::new());
    run_clip_end(&mut site, &mut page, Err("NotAllowedError".to_string()));
    run_clip_end(&mut site, &mut page, Ok(()));
    assert_eq!(page.video_src(), Some("vanilla-french-complete.mp4"));
}

#[test]
fn node_ids_are_unique_across_authored_and_rendered() {
    let (mut site, mut page) = load(MemoryStore::new());
    let authored = page.add_node(&["reveal-up"]);
    let data = MenuData::from_json(ONE_CATEGORY).unwrap();
    site.render_menu(&mut page, Some(&data));
    let rendered = page.nodes_with_class("menu-category");
    assert_eq!(rendered.len(), 1);
    assert_ne!(rendered[0], authored);
    assert!(rendered[0] > NodeId(0));
}

#[test]
fn menu_without_arabic_names_still_renders() {
    let (mut site, mut page) = load(MemoryStore::with("siteLang", "ar"));
    let data = MenuData::from_json(
        r#"[{
            "categoryId": "bakery",
            "categoryNameEn": "Bakery",
            "items": [{ "nameEn": "Croissant", "price": "9 SAR" }]
        }]"#,
    )
    .unwrap();

    assert_eq!(site.render_menu(&mut page, Some(&data)), 1);
    assert_eq!(page.menu()[0].children[0].content, "Bakery");
    assert!(page.shows_language(Language::Ar));

    dispatch(&mut site, &mut page, SiteEvent::LanguageToggleClicked);
    assert_eq!(page.menu()[0].children[0].content, "Bakery");
}

#[test]
fn empty_menu_table_leaves_container_untouched() {
    let (mut site, mut page) = load(MemoryStore::new());
    let data = MenuData::from_json("[]").unwrap();
    assert_eq!(site.render_menu(&mut page, Some(&data)), 0);
    assert!(page.has_menu_grid());
    assert_eq!(site.render_menu(&mut page, Some(&MenuData::from_json(ONE_CATEGORY).unwrap())), 1);
}
