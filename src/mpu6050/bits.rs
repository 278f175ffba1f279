use bitfield::bitfield;

bitfield! {
    /// bitfields of PWR_MGMT_1 register
    pub struct PwrMgmt1(u8);
    impl Debug;
    /// reset all internal registers to their default values, clears itself
    pub device_reset, set_device_reset: 7;
    /// put the device in sleep mode
    pub sleep, set_sleep: 6;
    /// cycle between sleep and single samples
    pub cycle, set_cycle: 5;
    /// disable the temperature sensor
    pub temp_dis, set_temp_dis: 3;
    /// clock source select
    pub u8, clksel, set_clksel: 2, 0;
}

bitfield! {
    /// bitfields of CONFIG register
    pub struct Config(u8);
    impl Debug;
    /// FSYNC pin sampling location
    pub u8, ext_sync_set, set_ext_sync_set: 5, 3;
    /// digital low pass filter setting
    pub u8, dlpf_cfg, set_dlpf_cfg: 2, 0;
}

bitfield! {
    /// bitfields of GYRO_CONFIG register
    pub struct GyroConfig(u8);
    impl Debug;
    /// X axis self test
    pub xg_st, set_xg_st: 7;
    /// Y axis self test
    pub yg_st, set_yg_st: 6;
    /// Z axis self test
    pub zg_st, set_zg_st: 5;
    /// full scale range select
    pub u8, fs_sel, set_fs_sel: 4, 3;
}

bitfield! {
    /// bitfields of ACCEL_CONFIG register
    pub struct AccelConfig(u8);
    impl Debug;
    /// X axis self test
    pub xa_st, set_xa_st: 7;
    /// Y axis self test
    pub ya_st, set_ya_st: 6;
    /// Z axis self test
    pub za_st, set_za_st: 5;
    /// full scale range select
    pub u8, afs_sel, set_afs_sel: 4, 3;
}

macro_rules! raw_access {
    ($($reg:ident),*) => {
        $(
            impl $reg {
                /// Wraps a raw register value.
                pub const fn new(raw: u8) -> Self {
                    $reg(raw)
                }

                /// The raw register value.
                pub const fn raw(&self) -> u8 {
                    self.0
                }
            }
        )*
    };
}

raw_access!(PwrMgmt1, Config, GyroConfig, AccelConfig);
