//! The config files shipped in `config/` load and agree with the built-in defaults.

use std::path::Path;

use bscdapp::abi;
use bscdapp::config::AppConfig;
use bscdapp_types::NetworkKind;

#[test]
fn default_toml_matches_builtin_defaults() {
    let loaded = AppConfig::load(Some("config/default")).unwrap();
    let builtin = AppConfig::default();

    assert_eq!(loaded.networks.recognized, vec![NetworkKind::BscMainnet]);
    assert_eq!(loaded.networks.help_url, builtin.networks.help_url);
    assert_eq!(loaded.page.message, "Hello Binance Smart Chain");
    assert_eq!(loaded.page.transfer_to, builtin.page.transfer_to);
    assert_eq!(loaded.page.transfer_amount, "0.01");
    assert_eq!(loaded.page.contract_method, "mint");
    assert_eq!(loaded.simulator.extensions, builtin.simulator.extensions);
    assert_eq!(loaded.simulator.accounts, builtin.simulator.accounts);
}

#[test]
fn shipped_abi_declares_mint() {
    let contract_abi = abi::load_abi(Path::new("config/abi.json")).unwrap();
    assert!(abi::has_function(&contract_abi, "mint"));
    assert!(!abi::has_function(&contract_abi, "Transfer"));
}
