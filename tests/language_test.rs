use cielo::domain::language::Language;

#[test]
fn test_spanish_code_is_the_constant() {
    assert_eq!(Language::Spanish.code(), Language::SPANISH);
    assert_eq!(Language::Spanish.to_string(), "ES");
}

#[test]
fn test_every_language_parses_from_its_code() {
    for language in [Language::Portuguese, Language::English, Language::Spanish] {
        assert_eq!(language.code().parse::<Language>().unwrap(), language);
    }
}
