use grammar_guard::completeness::is_content_sentence;
use grammar_guard::noise::{
    CodeFilter, CookieConsentFilter, HeadingFilter, NavigationFilter, UiElementFilter,
};
use grammar_guard::patterns::is_preposition_heading;
use grammar_guard::{NoiseClassifier, NoiseFilter, HP};

#[test]
fn headings() {
    for text in [
        "1. Introduction",
        "IV. Terms of Service",
        "2.1 Scope",
        "(a) Definitions",
        "Contact Us",
        "Use of our Services",
        "Use of Personal Data",
        "Scope of this Agreement",
        "The Right to Erasure",
        "How to Opt Out",
        "How We Use Your Data",
        "What We Collect:",
        "Definitions",
    ] {
        assert!(HeadingFilter.matches(text), "{text:?}");
    }
    for text in [
        "This is a complete sentence.",
        "We appreciate your business.",
        "Please visit our site to",
        "Some of these partners may sell data",
        "Many of our customers write to",
        "1. We collect your name and email address when you register for an account.",
    ] {
        assert!(!HeadingFilter.matches(text), "{text:?}");
    }
}

#[test]
fn ui_elements() {
    for text in ["Home", "Accept All", "  Read more \u{00BB}", "Terms and Conditions"] {
        assert!(UiElementFilter.matches(text), "{text:?}");
    }
    assert!(UiElementFilter.matches("\u{00A9} 2024 Example Inc."));
    assert!(!UiElementFilter.matches("Accept our apologies for the delay."));
}

#[test]
fn code_fragments() {
    assert!(CodeFilter.matches(".header { margin: 0 auto; }"));
    assert!(CodeFilter.matches("width: 100px"));
    assert!(!CodeFilter.matches(
        "We measure the width of every parcel we ship to make sure it fits the box."
    ));
}

#[test]
fn navigation_runs() {
    assert!(NavigationFilter.matches("Home | Products | Pricing | Blog"));
    assert!(NavigationFilter.matches(
        "Products Solutions Pricing Resources Company Careers Partners Support"
    ));
    assert!(!NavigationFilter.matches("Please visit our site to"));
    assert!(!NavigationFilter.matches("This policy explains how we collect data"));
    assert!(!NavigationFilter
        .matches("We ship worldwide | returns are free within thirty days of purchase"));
}

#[test]
fn cookie_banners() {
    assert!(CookieConsentFilter.matches("This website uses cookies to improve your experience."));
    for text in [
        "We accept returns within thirty days.",
        "You may decline to use the service at any time if you wish",
        "We protect your privacy using industry standard encryption.",
        "Read our privacy notice before you sign up for the site.",
    ] {
        assert!(!CookieConsentFilter.matches(text), "{text:?}");
    }
}

#[test]
fn classifier_reports_first_matching_filter() {
    let classifier = NoiseClassifier::default();
    assert_eq!(classifier.classify("Contact Us"), Some("heading"));
    assert_eq!(classifier.classify("Accept cookies"), Some("ui_element"));
    assert_eq!(classifier.classify("We appreciate your business."), None);
    assert!(!NoiseClassifier::empty().is_noise("Contact Us"));
}

#[test]
fn preposition_headings() {
    assert!(is_preposition_heading("The Right to"));
    assert!(is_preposition_heading("Limitation of"));
    assert!(is_preposition_heading("Disclosure of Information To"));
    assert!(!is_preposition_heading("Many of our customers write to"));
    assert!(!is_preposition_heading("Please visit our site to"));
}

#[test]
fn content_sentence_thresholds() {
    assert!(is_content_sentence("We are here now"));
    assert!(!is_content_sentence("We are here no"));
    assert!(!is_content_sentence("We are definitely"));
    assert!(is_content_sentence("Seven plain words form this little line"));
    assert!(!is_content_sentence("Six plain words form this line"));
    assert!(!is_content_sentence("Seven plain words @@@ form this little line"));
}

#[test]
fn baseline_thresholds() {
    assert_eq!(HP.content_min_chars, 15);
    assert_eq!(HP.content_min_tokens, 4);
    assert_eq!(HP.content_long_tokens, 7);
    assert_eq!(HP.content_max_special_density, 0.05);
    assert_eq!(HP.title_max_words, 7);
    assert_eq!(HP.title_max_chars, 60);
    assert_eq!(HP.pattern_min_run_chars, 10);
}
