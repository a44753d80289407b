//! `AMT_BootCapabilities` : options de démarrage supportées par le firmware

use crate::class::AMT_BOOT_CAPABILITIES;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use wsmclient::{Service, WsmanClient};

/// Une instance `AMT_BootCapabilities`
///
/// Les éléments absents d'une réponse gardent leur valeur par défaut.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename = "AMT_BootCapabilities", default)]
pub struct BootCapabilities {
    #[serde(rename = "InstanceID")]
    pub instance_id: String,

    #[serde(rename = "ElementName")]
    pub element_name: String,

    #[serde(rename = "IDER")]
    pub ider: bool,

    #[serde(rename = "SOL")]
    pub sol: bool,

    #[serde(rename = "BIOSReflash")]
    pub bios_reflash: bool,

    #[serde(rename = "BIOSSetup")]
    pub bios_setup: bool,

    #[serde(rename = "BIOSPause")]
    pub bios_pause: bool,

    #[serde(rename = "ForcePXEBoot")]
    pub force_pxe_boot: bool,

    #[serde(rename = "ForceHardDriveBoot")]
    pub force_hard_drive_boot: bool,

    #[serde(rename = "ForceHardDriveSafeModeBoot")]
    pub force_hard_drive_safe_mode_boot: bool,

    #[serde(rename = "ForceDiagnosticBoot")]
    pub force_diagnostic_boot: bool,

    #[serde(rename = "ForceCDorDVDBoot")]
    pub force_cd_or_dvd_boot: bool,

    #[serde(rename = "VerbosityScreenBlank")]
    pub verbosity_screen_blank: bool,

    #[serde(rename = "PowerButtonLock")]
    pub power_button_lock: bool,

    #[serde(rename = "ResetButtonLock")]
    pub reset_button_lock: bool,

    #[serde(rename = "KeyboardLock")]
    pub keyboard_lock: bool,

    #[serde(rename = "SleepButtonLock")]
    pub sleep_button_lock: bool,

    #[serde(rename = "UserPasswordBypass")]
    pub user_password_bypass: bool,

    #[serde(rename = "ForcedProgressEvents")]
    pub forced_progress_events: bool,

    #[serde(rename = "VerbosityVerbose")]
    pub verbosity_verbose: bool,

    #[serde(rename = "VerbosityQuiet")]
    pub verbosity_quiet: bool,

    #[serde(rename = "ConfigurationDataReset")]
    pub configuration_data_reset: bool,

    #[serde(rename = "BIOSSecureBoot")]
    pub bios_secure_boot: bool,

    #[serde(rename = "SecureErase")]
    pub secure_erase: bool,

    #[serde(rename = "ForceWinREBoot")]
    pub force_winre_boot: bool,

    #[serde(rename = "ForceUEFILocalPBABoot")]
    pub force_uefi_local_pba_boot: bool,

    #[serde(rename = "ForceUEFIHTTPSBoot")]
    pub force_uefi_https_boot: bool,

    #[serde(rename = "AMTSecureBootControl")]
    pub amt_secure_boot_control: bool,

    #[serde(rename = "UEFIWiFiCoExistenceAndProfileShare")]
    pub uefi_wifi_coexistence_and_profile_share: bool,

    #[serde(rename = "PlatformErase")]
    pub platform_erase: u32,
}

/// Get, Enumerate and Pull on `AMT_BootCapabilities`
pub fn service(client: Arc<WsmanClient>) -> Service<BootCapabilities> {
    AMT_BOOT_CAPABILITIES.service(client)
}
