//! Static inspection templates
//!
//! Reference data, not user-editable. Intervals follow the NFPA standard
//! cited in `regulation`; `external` marks inspections normally performed by
//! a certified outside vendor.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::enums::EquipmentCategory;

/// Unit of a template interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum IntervalType {
    Months,
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionTemplate {
    #[schema(value_type = String)]
    pub id: &'static str,
    #[schema(value_type = String)]
    pub name: &'static str,
    pub category: EquipmentCategory,
    /// Recurrence interval, in `interval_type` units
    pub interval: u32,
    #[serde(rename = "type")]
    pub interval_type: IntervalType,
    #[schema(value_type = String)]
    pub regulation: &'static str,
    pub external: bool,
}

const fn template(
    id: &'static str,
    name: &'static str,
    category: EquipmentCategory,
    interval: u32,
    regulation: &'static str,
    external: bool,
) -> InspectionTemplate {
    InspectionTemplate {
        id,
        name,
        category,
        interval,
        interval_type: IntervalType::Months,
        regulation,
        external,
    }
}

use EquipmentCategory::*;

pub static TEMPLATES: &[InspectionTemplate] = &[
    // SCBA
    template("scba-monthly", "SCBA Monthly Inspection", Scba, 1, "NFPA 1852 7.1.3 - Monthly inspection of SCBA", false),
    template("scba-annual-flow-test", "SCBA Annual Flow Test", Scba, 12, "NFPA 1852 7.3 - Annual flow test by certified technician", true),
    template("scba-annual-inspection", "SCBA Annual Inspection and Maintenance", Scba, 12, "NFPA 1852 7.2 - Annual inspection and maintenance", true),
    template("scba-cylinder-hydrostatic", "SCBA Cylinder Hydrostatic Test", Scba, 60, "DOT 49 CFR 180.205 / NFPA 1852 - Composite cylinder hydrostatic test every 5 years", true),
    template("scba-facepiece-fit-test", "SCBA Facepiece Fit Test", Scba, 12, "OSHA 29 CFR 1910.134 / NFPA 1500 7.15 - Annual respirator fit test", false),
    // PPE
    template("ppe-routine-inspection", "Turnout Gear Routine Inspection", Ppe, 1, "NFPA 1851 6.2 - Routine inspection after each use", false),
    template("ppe-advanced-inspection", "Turnout Gear Advanced Inspection", Ppe, 12, "NFPA 1851 6.3 - Advanced inspection at least every 12 months", false),
    template("ppe-advanced-cleaning", "Turnout Gear Advanced Cleaning", Ppe, 12, "NFPA 1851 7.3 - Advanced cleaning at least every 12 months", true),
    template("ppe-retirement-review", "Turnout Gear Retirement Review", Ppe, 120, "NFPA 1851 10.1.2 - Retire ensembles 10 years from manufacture", false),
    template("ppe-helmet-inspection", "Helmet Inspection", Ppe, 12, "NFPA 1851 6.3 - Advanced inspection of helmets", false),
    template("pass-device-monthly", "PASS Device Monthly Test", Ppe, 1, "NFPA 1982 - Personal alert safety system functional test", false),
    // Hose and appliances
    template("hose-annual-service-test", "Fire Hose Annual Service Test", Hose, 12, "NFPA 1962 7.1 - Annual hose service test", false),
    template("hose-quarterly-visual", "Fire Hose Quarterly Visual Inspection", Hose, 3, "NFPA 1962 4.3 - Visual inspection", false),
    template("nozzle-annual-inspection", "Nozzle Annual Inspection", Hose, 12, "NFPA 1962 6.2 - Nozzle inspection", false),
    template("appliance-annual-inspection", "Hose Appliance Annual Inspection", Hose, 12, "NFPA 1962 8.2 - Hose appliance inspection", false),
    // Ladders
    template("ground-ladder-annual-test", "Ground Ladder Annual Service Test", Ladders, 12, "NFPA 1932 6.2 - Annual ground ladder service test", true),
    template("ground-ladder-monthly-visual", "Ground Ladder Monthly Visual Inspection", Ladders, 1, "NFPA 1932 5.1 - Visual inspection", false),
    template("aerial-device-annual", "Aerial Device Annual Inspection", Ladders, 12, "NFPA 1911 17.2 - Annual aerial device inspection", true),
    template("aerial-device-nondestructive", "Aerial Device Nondestructive Test", Ladders, 60, "NFPA 1911 17.3 - Five-year nondestructive testing", true),
    // Apparatus
    template("pump-annual-service-test", "Fire Pump Annual Service Test", Apparatus, 12, "NFPA 1911 18.1 - Annual pump service test", true),
    template("apparatus-monthly-check", "Apparatus Monthly Check", Apparatus, 1, "NFPA 1911 6.2 - Apparatus operational check", false),
    template("apparatus-annual-inspection", "Apparatus Annual Inspection", Apparatus, 12, "NFPA 1911 6.1 - Annual apparatus inspection", true),
    template("apparatus-dot-inspection", "Apparatus DOT Inspection", Apparatus, 12, "FMCSA 49 CFR 396.17 - Annual vehicle inspection", true),
    // Rescue tools
    template("hydraulic-rescue-tool-annual", "Hydraulic Rescue Tool Annual Inspection", RescueTools, 12, "NFPA 1936 - Annual rescue tool inspection", true),
    template("rescue-rope-inspection", "Life Safety Rope Inspection", RescueTools, 12, "NFPA 1858 - Life safety rope and equipment inspection", false),
    template("harness-inspection", "Harness Inspection", RescueTools, 12, "NFPA 1858 - Harness inspection", false),
    template("lifting-bag-inspection", "Lifting Bag Inspection", RescueTools, 12, "Manufacturer specification - Lifting bag inspection", false),
    // Thermal imaging
    template("tic-monthly", "Thermal Imager Monthly Check", ThermalImaging, 1, "NFPA 1801 - Operational check", false),
    template("tic-annual", "Thermal Imager Annual Service", ThermalImaging, 12, "NFPA 1801 - Annual manufacturer service", true),
    // Gas detection
    template("gas-detector-bump-test", "Gas Detector Bump Test", GasDetection, 1, "ISEA 2010 / Manufacturer specification - Bump test", false),
    template("gas-detector-calibration", "Gas Detector Calibration", GasDetection, 6, "Manufacturer specification - Full calibration", false),
    // Medical
    template("aed-monthly", "AED Monthly Check", Medical, 1, "AHA / Manufacturer specification - AED readiness check", false),
    template("aed-pads-battery", "AED Pads and Battery Replacement", Medical, 24, "Manufacturer specification - Pads and battery replacement", false),
    template("oxygen-cylinder-hydrostatic", "Oxygen Cylinder Hydrostatic Test", Medical, 60, "DOT 49 CFR 180.209 - Cylinder requalification every 5 years", true),
    template("medical-bag-monthly", "Medical Bag Monthly Inventory", Medical, 1, "Department protocol - Medical supply inventory", false),
    // Communications
    template("portable-radio-annual", "Portable Radio Annual Service", Communications, 12, "NFPA 1221 - Annual radio maintenance", true),
    // Extinguishers
    template("extinguisher-monthly", "Extinguisher Monthly Inspection", Extinguishers, 1, "NFPA 10 7.2 - Monthly inspection", false),
    template("extinguisher-annual", "Extinguisher Annual Maintenance", Extinguishers, 12, "NFPA 10 7.3 - Annual maintenance", true),
    template("extinguisher-six-year", "Extinguisher Six-Year Maintenance", Extinguishers, 72, "NFPA 10 7.3.3 - Six-year internal examination", true),
    template("extinguisher-hydrostatic", "Extinguisher Hydrostatic Test", Extinguishers, 144, "NFPA 10 8.3 - Twelve-year hydrostatic test", true),
    // Power tools
    template("chainsaw-quarterly", "Chainsaw Quarterly Inspection", PowerTools, 3, "Manufacturer specification - Quarterly inspection", false),
    template("generator-monthly", "Generator Monthly Test Run", PowerTools, 1, "Manufacturer specification - Monthly test run", false),
    template("ppv-fan-quarterly", "PPV Fan Quarterly Inspection", PowerTools, 3, "Manufacturer specification - Quarterly inspection", false),
];

/// Look up a template by id
pub fn find(id: &str) -> Option<&'static InspectionTemplate> {
    TEMPLATES.iter().find(|t| t.id == id)
}

/// Templates applicable to one equipment category
pub fn for_category(category: EquipmentCategory) -> impl Iterator<Item = &'static InspectionTemplate> {
    TEMPLATES.iter().filter(move |t| t.category == category)
}
