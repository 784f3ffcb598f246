//! The enum catalog: closed, total mappings from wire values to variants.
//!
//! Every enum here is a total function of its underlying bits — there is
//! always a variant to return, usually an explicit "unknown" or "reserved"
//! member carrying the raw value, so a schema decoder never fails just
//! because a field held a reserved or out-of-range code.

/// Electronic Position Fixing Device type: the device used to fix a
/// vessel's position.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EpfdType {
    Gps,
    Glonass,
    CombinedGpsAndGlonass,
    LoranC,
    Chayka,
    IntegratedNavigationSystem,
    Surveyed,
    Galileo,
    Unknown(u8),
}

impl EpfdType {
    pub fn parse(data: u8) -> Option<Self> {
        match data {
            0 => None,
            1 => Some(Self::Gps),
            2 => Some(Self::Glonass),
            3 => Some(Self::CombinedGpsAndGlonass),
            4 => Some(Self::LoranC),
            5 => Some(Self::Chayka),
            6 => Some(Self::IntegratedNavigationSystem),
            7 => Some(Self::Surveyed),
            8 => Some(Self::Galileo),
            15 => None,
            _ => Some(Self::Unknown(data)),
        }
    }

    /// Inverse of `parse`, for encoders. `None` encodes as 0 ("undefined").
    pub fn code(value: Option<Self>) -> u8 {
        match value {
            None => 0,
            Some(Self::Gps) => 1,
            Some(Self::Glonass) => 2,
            Some(Self::CombinedGpsAndGlonass) => 3,
            Some(Self::LoranC) => 4,
            Some(Self::Chayka) => 5,
            Some(Self::IntegratedNavigationSystem) => 6,
            Some(Self::Surveyed) => 7,
            Some(Self::Galileo) => 8,
            Some(Self::Unknown(code)) => code,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ShipType {
    Reserved(u8),
    WingInGround,
    WingInGroundHazardousCategoryA,
    WingInGroundHazardousCategoryB,
    WingInGroundHazardousCategoryC,
    WingInGroundHazardousCategoryD,
    WingInGroundReserved(u8),
    Fishing,
    Towing,
    TowingLarge,
    Dredging,
    DivingOps,
    MilitaryOps,
    Sailing,
    PleasureCraft,
    HighSpeedCraft,
    HighSpeedCraftHazardousCategoryA,
    HighSpeedCraftHazardousCategoryB,
    HighSpeedCraftHazardousCategoryC,
    HighSpeedCraftHazardousCategoryD,
    HighSpeedCraftReserved(u8),
    HighSpeedCraftNoAdditionalInformation,
    PilotVessel,
    SearchAndRescueVessel,
    Tug,
    PortTender,
    AntiPollutionEquipment,
    LawEnforcement,
    SpareLocalVessel(u8),
    MedicalTransport,
    NoncombatantShip,
    Passenger,
    PassengerHazardousCategoryA,
    PassengerHazardousCategoryB,
    PassengerHazardousCategoryC,
    PassengerHazardousCategoryD,
    PassengerReserved(u8),
    PassengerNoAdditionalInformation,
    Cargo,
    CargoHazardousCategoryA,
    CargoHazardousCategoryB,
    CargoHazardousCategoryC,
    CargoHazardousCategoryD,
    CargoReserved(u8),
    CargoNoAdditionalInformation,
    Tanker,
    TankerHazardousCategoryA,
    TankerHazardousCategoryB,
    TankerHazardousCategoryC,
    TankerHazardousCategoryD,
    TankerReserved(u8),
    TankerNoAdditionalInformation,
    Other,
    OtherHazardousCategoryA,
    OtherHazardousCategoryB,
    OtherHazardousCategoryC,
    OtherHazardousCategoryD,
    OtherReserved(u8),
    OtherNoAdditionalInformation,
}

impl ShipType {
    pub fn parse(data: u8) -> Option<Self> {
        match data {
            0 => None,
            1..=19 => Some(Self::Reserved(data)),
            20 => Some(Self::WingInGround),
            21 => Some(Self::WingInGroundHazardousCategoryA),
            22 => Some(Self::WingInGroundHazardousCategoryB),
            23 => Some(Self::WingInGroundHazardousCategoryC),
            24 => Some(Self::WingInGroundHazardousCategoryD),
            25..=29 => Some(Self::WingInGroundReserved(data)),
            30 => Some(Self::Fishing),
            31 => Some(Self::Towing),
            32 => Some(Self::TowingLarge),
            33 => Some(Self::Dredging),
            34 => Some(Self::DivingOps),
            35 => Some(Self::MilitaryOps),
            36 => Some(Self::Sailing),
            37 => Some(Self::PleasureCraft),
            38..=39 => Some(Self::Reserved(data)),
            40 => Some(Self::HighSpeedCraft),
            41 => Some(Self::HighSpeedCraftHazardousCategoryA),
            42 => Some(Self::HighSpeedCraftHazardousCategoryB),
            43 => Some(Self::HighSpeedCraftHazardousCategoryC),
            44 => Some(Self::HighSpeedCraftHazardousCategoryD),
            45..=48 => Some(Self::HighSpeedCraftReserved(data)),
            49 => Some(Self::HighSpeedCraftNoAdditionalInformation),
            50 => Some(Self::PilotVessel),
            51 => Some(Self::SearchAndRescueVessel),
            52 => Some(Self::Tug),
            53 => Some(Self::PortTender),
            54 => Some(Self::AntiPollutionEquipment),
            55 => Some(Self::LawEnforcement),
            56..=57 => Some(Self::SpareLocalVessel(data)),
            58 => Some(Self::MedicalTransport),
            59 => Some(Self::NoncombatantShip),
            60 => Some(Self::Passenger),
            61 => Some(Self::PassengerHazardousCategoryA),
            62 => Some(Self::PassengerHazardousCategoryB),
            63 => Some(Self::PassengerHazardousCategoryC),
            64 => Some(Self::PassengerHazardousCategoryD),
            65..=68 => Some(Self::PassengerReserved(data)),
            69 => Some(Self::PassengerNoAdditionalInformation),
            70 => Some(Self::Cargo),
            71 => Some(Self::CargoHazardousCategoryA),
            72 => Some(Self::CargoHazardousCategoryB),
            73 => Some(Self::CargoHazardousCategoryC),
            74 => Some(Self::CargoHazardousCategoryD),
            75..=78 => Some(Self::CargoReserved(data)),
            79 => Some(Self::CargoNoAdditionalInformation),
            80 => Some(Self::Tanker),
            81 => Some(Self::TankerHazardousCategoryA),
            82 => Some(Self::TankerHazardousCategoryB),
            83 => Some(Self::TankerHazardousCategoryC),
            84 => Some(Self::TankerHazardousCategoryD),
            85..=88 => Some(Self::TankerReserved(data)),
            89 => Some(Self::TankerNoAdditionalInformation),
            90 => Some(Self::Other),
            91 => Some(Self::OtherHazardousCategoryA),
            92 => Some(Self::OtherHazardousCategoryB),
            93 => Some(Self::OtherHazardousCategoryC),
            94 => Some(Self::OtherHazardousCategoryD),
            95..=98 => Some(Self::OtherReserved(data)),
            99 => Some(Self::OtherNoAdditionalInformation),
            100..=u8::MAX => None,
        }
    }

    /// Inverse of `parse`, for encoders. `None` encodes as 0 ("not available").
    pub fn code(value: Option<Self>) -> u8 {
        match value {
            None => 0,
            Some(Self::Reserved(code)) => code,
            Some(Self::WingInGround) => 20,
            Some(Self::WingInGroundHazardousCategoryA) => 21,
            Some(Self::WingInGroundHazardousCategoryB) => 22,
            Some(Self::WingInGroundHazardousCategoryC) => 23,
            Some(Self::WingInGroundHazardousCategoryD) => 24,
            Some(Self::WingInGroundReserved(code)) => code,
            Some(Self::Fishing) => 30,
            Some(Self::Towing) => 31,
            Some(Self::TowingLarge) => 32,
            Some(Self::Dredging) => 33,
            Some(Self::DivingOps) => 34,
            Some(Self::MilitaryOps) => 35,
            Some(Self::Sailing) => 36,
            Some(Self::PleasureCraft) => 37,
            Some(Self::HighSpeedCraft) => 40,
            Some(Self::HighSpeedCraftHazardousCategoryA) => 41,
            Some(Self::HighSpeedCraftHazardousCategoryB) => 42,
            Some(Self::HighSpeedCraftHazardousCategoryC) => 43,
            Some(Self::HighSpeedCraftHazardousCategoryD) => 44,
            Some(Self::HighSpeedCraftReserved(code)) => code,
            Some(Self::HighSpeedCraftNoAdditionalInformation) => 49,
            Some(Self::PilotVessel) => 50,
            Some(Self::SearchAndRescueVessel) => 51,
            Some(Self::Tug) => 52,
            Some(Self::PortTender) => 53,
            Some(Self::AntiPollutionEquipment) => 54,
            Some(Self::LawEnforcement) => 55,
            Some(Self::SpareLocalVessel(code)) => code,
            Some(Self::MedicalTransport) => 58,
            Some(Self::NoncombatantShip) => 59,
            Some(Self::Passenger) => 60,
            Some(Self::PassengerHazardousCategoryA) => 61,
            Some(Self::PassengerHazardousCategoryB) => 62,
            Some(Self::PassengerHazardousCategoryC) => 63,
            Some(Self::PassengerHazardousCategoryD) => 64,
            Some(Self::PassengerReserved(code)) => code,
            Some(Self::PassengerNoAdditionalInformation) => 69,
            Some(Self::Cargo) => 70,
            Some(Self::CargoHazardousCategoryA) => 71,
            Some(Self::CargoHazardousCategoryB) => 72,
            Some(Self::CargoHazardousCategoryC) => 73,
            Some(Self::CargoHazardousCategoryD) => 74,
            Some(Self::CargoReserved(code)) => code,
            Some(Self::CargoNoAdditionalInformation) => 79,
            Some(Self::Tanker) => 80,
            Some(Self::TankerHazardousCategoryA) => 81,
            Some(Self::TankerHazardousCategoryB) => 82,
            Some(Self::TankerHazardousCategoryC) => 83,
            Some(Self::TankerHazardousCategoryD) => 84,
            Some(Self::TankerReserved(code)) => code,
            Some(Self::TankerNoAdditionalInformation) => 89,
            Some(Self::Other) => 90,
            Some(Self::OtherHazardousCategoryA) => 91,
            Some(Self::OtherHazardousCategoryB) => 92,
            Some(Self::OtherHazardousCategoryC) => 93,
            Some(Self::OtherHazardousCategoryD) => 94,
            Some(Self::OtherReserved(code)) => code,
            Some(Self::OtherNoAdditionalInformation) => 99,
        }
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Dte {
    Ready,
    NotReady,
}

impl Default for Dte {
    fn default() -> Self {
        Dte::NotReady
    }
}

impl From<u8> for Dte {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Ready,
            _ => Self::NotReady,
        }
    }
}

impl Dte {
    pub fn code(self) -> u8 {
        match self {
            Self::Ready => 0,
            Self::NotReady => 1,
        }
    }
}

/// Whether a station operates autonomously or has been assigned a reporting
/// schedule by a base station (type 16/20/22/23 "assigned mode" bit).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum AssignedMode {
    Autonomous,
    Assigned,
}

impl AssignedMode {
    pub fn parse(val: u8) -> Self {
        match val {
            0 => Self::Autonomous,
            _ => Self::Assigned,
        }
    }
}

/// Class B transceiver's reporting technology (type 18's "class B unit"
/// flag).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum CarrierSense {
    Sotdma,
    CarrierSense,
}

impl CarrierSense {
    pub fn parse(val: u8) -> Self {
        match val {
            0 => Self::Sotdma,
            _ => Self::CarrierSense,
        }
    }
}

/// Maneuver indicator (type 1-3's "special maneuver" flag).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ManeuverIndicator {
    NoSpecialManeuver,
    SpecialManeuver,
    Unknown(u8),
}

impl ManeuverIndicator {
    pub fn parse(data: u8) -> Option<Self> {
        match data {
            0 => None,
            1 => Some(Self::NoSpecialManeuver),
            2 => Some(Self::SpecialManeuver),
            _ => Some(Self::Unknown(data)),
        }
    }
}
