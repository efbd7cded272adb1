use callwarden_core::platform::ProtectionSettings;
use callwarden_store::repo::PROTECTION_ENABLED;
use callwarden_store::Store;

#[test]
fn settings_roundtrip_and_defaults() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let settings = store.settings();
    assert_eq!(settings.get("missing").expect("get"), None);
    assert!(settings.get_bool("grant.read-contacts", true).expect("get"));
    assert!(!settings.get_bool("grant.read-contacts", false).expect("get"));

    settings.set_bool("grant.read-contacts", true).expect("set");
    assert!(settings.get_bool("grant.read-contacts", false).expect("get"));

    settings.set_bool("grant.read-contacts", false).expect("set");
    assert!(!settings.get_bool("grant.read-contacts", true).expect("get"));
}

#[test]
fn protection_flag_defaults_off() {
    let store = Store::open_in_memory().expect("open in memory");
    store.migrate().expect("migrate");

    let repo = store.settings();
    let port: &dyn ProtectionSettings = &repo;
    assert!(!port.protection_enabled().expect("read flag"));

    repo.set_bool(PROTECTION_ENABLED, true).expect("enable");
    assert!(port.protection_enabled().expect("read flag"));
}
