//! Static agronomic calendars: growth stages, care tips and harvest indicators
//! for every supported crop.

use crate::models::CropType;

/// One growth stage of a crop, in days relative to its own start.
#[derive(Debug)]
pub struct StageTemplate {
    pub name: &'static str,
    pub duration_days: u32,
    pub description: &'static str,
    pub irrigation_frequency: &'static str,
    pub activities: &'static [&'static str],
    pub fertilizers: &'static [&'static str],
    pub weather: &'static str,
    pub risks: &'static [&'static str],
}

/// Full lifecycle template for a crop. Stage durations sum to `total_days`.
#[derive(Debug)]
pub struct CropCalendar {
    pub name: &'static str,
    pub total_days: u32,
    pub stages: &'static [StageTemplate],
    pub care_tips: &'static [&'static str],
    pub harvest_indicators: &'static [&'static str],
}

pub fn crop_calendar(crop: CropType) -> &'static CropCalendar {
    match crop {
        CropType::Wheat => &WHEAT,
        CropType::Rice => &RICE,
        CropType::Maize => &MAIZE,
        CropType::Cotton => &COTTON,
        CropType::Soybean => &SOYBEAN,
        CropType::Sugarcane => &SUGARCANE,
    }
}

static WHEAT: CropCalendar = CropCalendar {
    name: "Wheat",
    total_days: 135,
    stages: &[
        StageTemplate {
            name: "Germination & Emergence",
            duration_days: 10,
            description: "Seed germination and seedling emergence phase",
            irrigation_frequency: "Light watering every 2-3 days",
            activities: &[
                "Ensure soil moisture is adequate for germination",
                "Monitor for uniform emergence",
                "Protect from birds if necessary",
            ],
            fertilizers: &["Apply basal fertilizer (Phosphorus and Potassium)"],
            weather: "Requires moderate temperature (15-20°C) and consistent moisture",
            risks: &["Bird damage", "Poor germination due to drought", "Waterlogging"],
        },
        StageTemplate {
            name: "Tillering",
            duration_days: 30,
            description: "Plant produces multiple shoots from the base",
            irrigation_frequency: "Irrigate every 7-10 days depending on rainfall",
            activities: &[
                "First weeding at 20-25 days after sowing",
                "Monitor for pest attacks (aphids, shoot fly)",
                "Ensure proper plant spacing",
            ],
            fertilizers: &["Apply first dose of nitrogen (30-40% of total)"],
            weather: "Cool temperatures favor tillering. Avoid waterlogging",
            risks: &["Weed competition", "Aphid infestation", "Frost damage in cold regions"],
        },
        StageTemplate {
            name: "Stem Elongation",
            duration_days: 25,
            description: "Rapid vertical growth of stems",
            irrigation_frequency: "Critical irrigation period - every 7 days",
            activities: &[
                "Second weeding if needed",
                "Monitor for stem borer and rust diseases",
                "Ensure adequate drainage",
            ],
            fertilizers: &["Apply second dose of nitrogen (30% of total)"],
            weather: "Requires consistent moisture and moderate temperatures",
            risks: &["Stem borer", "Rust diseases", "Lodging due to excessive nitrogen"],
        },
        StageTemplate {
            name: "Booting & Heading",
            duration_days: 15,
            description: "Formation and emergence of grain head",
            irrigation_frequency: "Most critical - irrigate every 5-7 days",
            activities: &[
                "Monitor for head diseases (smut, bunt)",
                "Protect from high winds",
                "Scout for aphids on heads",
            ],
            fertilizers: &["Light nitrogen application if needed (10-20% of total)"],
            weather: "Cool nights and warm days are ideal. Avoid heat stress",
            risks: &["Head smut", "Aphids", "Heat stress affecting grain formation"],
        },
        StageTemplate {
            name: "Flowering & Grain Filling",
            duration_days: 30,
            description: "Pollination and grain development phase",
            irrigation_frequency: "Irrigate every 7-10 days, reduce towards maturity",
            activities: &[
                "Monitor grain filling progress",
                "Scout for grain-sucking insects",
                "Protect from birds as grains mature",
            ],
            fertilizers: &["Foliar spray of micronutrients if deficiency observed"],
            weather: "Warm days and adequate moisture needed. Avoid heat waves",
            risks: &["Grain shriveling due to heat", "Bird damage", "Grain-sucking bugs"],
        },
        StageTemplate {
            name: "Maturation & Drying",
            duration_days: 25,
            description: "Grain reaches physiological maturity",
            irrigation_frequency: "Stop irrigation 10-15 days before harvest",
            activities: &[
                "Monitor grain moisture content",
                "Prepare harvesting equipment",
                "Plan harvest timing to avoid shattering",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather ideal. Avoid rains that can cause sprouting",
            risks: &["Pre-harvest sprouting if rain occurs", "Grain shattering", "Lodging"],
        },
    ],
    care_tips: &[
        "Monitor regularly for disease and pest symptoms",
        "Maintain proper drainage to avoid waterlogging",
        "Scout fields at least twice a week during critical stages",
        "Keep records of all inputs and observations for future planning",
    ],
    harvest_indicators: &[
        "80-85% of grains are golden brown in color",
        "Grain moisture content is 20-25%",
        "Grains are hard and difficult to crush with fingernail",
        "Lower leaves have dried completely",
    ],
};

static RICE: CropCalendar = CropCalendar {
    name: "Rice",
    total_days: 120,
    stages: &[
        StageTemplate {
            name: "Germination & Seedling",
            duration_days: 20,
            description: "Seed germination and early seedling development",
            irrigation_frequency: "Keep nursery bed continuously moist/flooded",
            activities: &[
                "Prepare nursery beds with fine tilth",
                "Sow pre-germinated seeds",
                "Maintain water level at 2-3 cm",
            ],
            fertilizers: &["Apply basal fertilizer in nursery bed"],
            weather: "Warm temperatures (25-35°C) and consistent water supply needed",
            risks: &["Damping off disease", "Rat damage", "Poor germination"],
        },
        StageTemplate {
            name: "Transplanting & Establishment",
            duration_days: 10,
            description: "Seedlings transplanted to main field",
            irrigation_frequency: "Maintain 2-5 cm standing water",
            activities: &[
                "Transplant 20-25 day old seedlings",
                "Maintain proper spacing (20x15 cm)",
                "Remove weeds before flooding",
            ],
            fertilizers: &["Apply basal dose (50% nitrogen, full P & K)"],
            weather: "Adequate water for establishment. Avoid water stress",
            risks: &["Transplanting shock", "Weed emergence", "Leaf folder attack"],
        },
        StageTemplate {
            name: "Tillering",
            duration_days: 30,
            description: "Production of tillers from main plant",
            irrigation_frequency: "Maintain 3-5 cm water depth",
            activities: &[
                "First weeding at 15-20 days after transplanting",
                "Monitor for stem borer and leaf folder",
                "Ensure proper water management",
            ],
            fertilizers: &["Apply first top dressing of nitrogen (25% of total) at 20-25 DAT"],
            weather: "Warm weather with adequate water promotes tillering",
            risks: &["Stem borer", "Brown plant hopper", "Blast disease"],
        },
        StageTemplate {
            name: "Panicle Initiation",
            duration_days: 15,
            description: "Formation of panicle (grain head) inside stem",
            irrigation_frequency: "Critical stage - maintain 5 cm water depth",
            activities: &[
                "Second weeding if necessary",
                "Monitor for nutrient deficiency symptoms",
                "Scout for pests and diseases",
            ],
            fertilizers: &["Apply second top dressing of nitrogen (25% of total)"],
            weather: "Sensitive to water stress. Ensure adequate water supply",
            risks: &["Water stress reducing panicle size", "Neck blast", "Sheath blight"],
        },
        StageTemplate {
            name: "Flowering & Grain Filling",
            duration_days: 30,
            description: "Flowering and grain development",
            irrigation_frequency: "Maintain 3-5 cm water until dough stage",
            activities: &[
                "Monitor grain filling",
                "Protect from birds",
                "Scout for grain-sucking insects",
            ],
            fertilizers: &["Foliar spray of potassium if needed for grain filling"],
            weather: "Warm days and cool nights ideal. Avoid heat during flowering",
            risks: &["Poor pollination due to heat", "Grain discoloration", "Bird damage"],
        },
        StageTemplate {
            name: "Ripening & Maturity",
            duration_days: 15,
            description: "Grains mature and field is drained",
            irrigation_frequency: "Drain field 10-15 days before harvest",
            activities: &[
                "Monitor grain maturity (80-85% golden grains)",
                "Prepare for harvest",
                "Protect from birds and rats",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather preferred for harvest. Avoid continuous rain",
            risks: &["Grain shattering", "Lodging", "Rat damage"],
        },
    ],
    care_tips: &[
        "Maintain proper water depth throughout growth stages",
        "Regular field inspection for pest and disease management",
        "Remove weeds promptly to reduce competition",
        "Monitor water quality in flooded conditions",
    ],
    harvest_indicators: &[
        "80-85% of grains are golden yellow",
        "Grains are hard when pressed between fingers",
        "Lower leaves have dried and turned brown",
        "Grain moisture is around 20-25%",
    ],
};

static MAIZE: CropCalendar = CropCalendar {
    name: "Maize (Corn)",
    total_days: 100,
    stages: &[
        StageTemplate {
            name: "Germination & Emergence",
            duration_days: 8,
            description: "Seed germinates and seedling emerges",
            irrigation_frequency: "Light irrigation immediately after sowing, then as needed",
            activities: &[
                "Ensure seed is planted at proper depth (3-5 cm)",
                "Protect from birds and rodents",
                "Check for uniform emergence",
            ],
            fertilizers: &["Apply basal fertilizer (full P & K, 25% nitrogen)"],
            weather: "Warm soil (18-30°C) and adequate moisture required",
            risks: &["Poor germination", "Bird damage", "Cutworm attack"],
        },
        StageTemplate {
            name: "Vegetative Growth",
            duration_days: 30,
            description: "Rapid leaf and root development",
            irrigation_frequency: "Irrigate every 7-10 days depending on rainfall",
            activities: &[
                "First weeding at 20 days after sowing",
                "Earthing up around plants",
                "Monitor for fall armyworm and stem borer",
            ],
            fertilizers: &["Apply first top dressing of nitrogen (35% of total) at 25-30 DAS"],
            weather: "Warm temperatures and regular moisture for growth",
            risks: &["Fall armyworm", "Stem borer", "Weed competition"],
        },
        StageTemplate {
            name: "Tasseling",
            duration_days: 10,
            description: "Male flower (tassel) emerges",
            irrigation_frequency: "Critical period - irrigate every 5-7 days",
            activities: &[
                "Monitor for proper tasseling",
                "Scout for pests on tassels",
                "Ensure good plant health",
            ],
            fertilizers: &["Apply second top dressing of nitrogen (40% of total)"],
            weather: "Sensitive to water stress. Ensure adequate moisture",
            risks: &["Water stress affecting tassel formation", "Aphids", "Blight diseases"],
        },
        StageTemplate {
            name: "Silking & Pollination",
            duration_days: 12,
            description: "Female flowers emerge and pollination occurs",
            irrigation_frequency: "Most critical - irrigate every 5 days if no rain",
            activities: &[
                "Ensure good pollination (check silk emergence)",
                "Monitor for silk-eating insects",
                "Protect from high winds",
            ],
            fertilizers: &["Foliar spray of micronutrients if deficiency seen"],
            weather: "Water stress during this period severely reduces yield",
            risks: &["Poor pollination due to stress", "Corn earworm", "Silk feeders"],
        },
        StageTemplate {
            name: "Grain Filling",
            duration_days: 25,
            description: "Kernel development and filling",
            irrigation_frequency: "Irrigate every 7 days, reduce towards maturity",
            activities: &[
                "Monitor kernel development",
                "Protect ears from birds and insects",
                "Scout for ear rot diseases",
            ],
            fertilizers: &["No additional fertilizer needed"],
            weather: "Adequate moisture needed for proper kernel filling",
            risks: &["Kernel abortion due to stress", "Ear rot", "Bird damage"],
        },
        StageTemplate {
            name: "Maturity & Harvest",
            duration_days: 15,
            description: "Grains reach physiological maturity",
            irrigation_frequency: "Stop irrigation 10 days before harvest",
            activities: &[
                "Monitor grain moisture (harvest at 20-25% moisture)",
                "Prepare harvesting equipment",
                "Plan for drying if needed",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather ideal for harvest",
            risks: &["Stalk rot causing lodging", "Bird/animal damage", "Post-harvest losses"],
        },
    ],
    care_tips: &[
        "Practice crop rotation to reduce pest and disease pressure",
        "Monitor closely for fall armyworm, especially in early stages",
        "Ensure good drainage to prevent root diseases",
        "Scout fields regularly for nutrient deficiencies",
    ],
    harvest_indicators: &[
        "Husks are dry and brown",
        "Kernels are hard and dent when pressed",
        "Black layer has formed at base of kernel",
        "Grain moisture is 20-25%",
    ],
};

static COTTON: CropCalendar = CropCalendar {
    name: "Cotton",
    total_days: 165,
    stages: &[
        StageTemplate {
            name: "Germination & Emergence",
            duration_days: 10,
            description: "Seed germination and cotyledon emergence",
            irrigation_frequency: "Pre-sowing irrigation, then light irrigation after 7-10 days",
            activities: &[
                "Ensure good seed bed preparation",
                "Sow seeds at 3-5 cm depth",
                "Monitor for uniform stand",
            ],
            fertilizers: &["Apply basal dose (full P & K, 25% nitrogen)"],
            weather: "Warm soil temperature (18-30°C) required",
            risks: &["Poor germination", "Seedling diseases", "Cutworm damage"],
        },
        StageTemplate {
            name: "Seedling Establishment",
            duration_days: 20,
            description: "True leaf development and root establishment",
            irrigation_frequency: "Light irrigation every 10-12 days",
            activities: &[
                "Thinning to maintain proper plant population",
                "First weeding",
                "Monitor for jassids and thrips",
            ],
            fertilizers: &["Apply first top dressing of nitrogen (30% of total) at 30 DAS"],
            weather: "Warm weather with moderate moisture",
            risks: &["Jassid attack", "Thrips", "Weed competition"],
        },
        StageTemplate {
            name: "Squaring",
            duration_days: 30,
            description: "Formation of flower buds (squares)",
            irrigation_frequency: "Irrigate every 10-15 days",
            activities: &[
                "Monitor for boll weevil and budworms",
                "Second weeding and hoeing",
                "Check for nutrient deficiencies",
            ],
            fertilizers: &["Apply second top dressing of nitrogen (25% of total) at 50-60 DAS"],
            weather: "Warm days and adequate moisture promote squaring",
            risks: &["Boll weevil", "Budworm", "Square shedding due to stress"],
        },
        StageTemplate {
            name: "Flowering & Boll Formation",
            duration_days: 40,
            description: "Flowers open and bolls begin to develop",
            irrigation_frequency: "Critical period - irrigate every 7-10 days",
            activities: &[
                "Monitor for bollworms and pink bollworm",
                "Hand-pick damaged bolls",
                "Ensure good pollination",
            ],
            fertilizers: &["Apply third dose of nitrogen (20% of total) at peak flowering"],
            weather: "Sensitive to water stress. High humidity may cause disease",
            risks: &["Bollworms", "Boll shedding", "Boll rot in humid conditions"],
        },
        StageTemplate {
            name: "Boll Development",
            duration_days: 40,
            description: "Bolls mature and fiber develops",
            irrigation_frequency: "Irrigate every 10-15 days, reduce late in stage",
            activities: &[
                "Continue monitoring for pests",
                "Remove diseased bolls",
                "Prepare for harvest",
            ],
            fertilizers: &["Foliar spray of potassium if needed"],
            weather: "Warm, dry weather ideal for boll maturation",
            risks: &["Late season pests", "Boll rot", "Premature opening"],
        },
        StageTemplate {
            name: "Boll Opening & Harvest",
            duration_days: 25,
            description: "Bolls open and cotton is ready for picking",
            irrigation_frequency: "Stop irrigation 2-3 weeks before harvest",
            activities: &[
                "Hand-pick or machine harvest when 60-70% bolls open",
                "Pick clean, dry cotton",
                "Multiple pickings may be needed",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather essential for quality harvest",
            risks: &["Rain staining fiber", "Loss of quality", "Leaf contamination"],
        },
    ],
    care_tips: &[
        "Integrated pest management is essential for cotton",
        "Regular scouting for bollworms and sucking pests",
        "Maintain field sanitation to reduce pest carryover",
        "Monitor plant health and address stress promptly",
    ],
    harvest_indicators: &[
        "60-70% of bolls have opened fully",
        "Fiber is white and fluffy",
        "Bolls separate easily from plant",
        "Weather conditions are dry",
    ],
};

static SOYBEAN: CropCalendar = CropCalendar {
    name: "Soybean",
    total_days: 95,
    stages: &[
        StageTemplate {
            name: "Germination & Emergence",
            duration_days: 8,
            description: "Seed germinates and seedling emerges",
            irrigation_frequency: "Ensure adequate soil moisture at sowing",
            activities: &[
                "Inoculate seeds with rhizobium if needed",
                "Sow at 3-4 cm depth",
                "Monitor emergence uniformity",
            ],
            fertilizers: &["Apply starter fertilizer (P & K, minimal nitrogen)"],
            weather: "Warm soil (18-25°C) and good moisture required",
            risks: &["Poor emergence", "Damping off", "Seed rot"],
        },
        StageTemplate {
            name: "Vegetative Growth (V1-V5)",
            duration_days: 25,
            description: "Development of true leaves and nodes",
            irrigation_frequency: "Irrigate as needed to avoid stress (every 10-12 days)",
            activities: &[
                "First weeding at 15-20 days",
                "Monitor for leaf-eating caterpillars",
                "Ensure good nodulation on roots",
            ],
            fertilizers: &["Usually no nitrogen needed if nodulation is good, apply if deficient"],
            weather: "Moderate temperatures and adequate moisture",
            risks: &["Weed competition", "Leaf miners", "Poor nodulation"],
        },
        StageTemplate {
            name: "Flowering (R1-R2)",
            duration_days: 15,
            description: "Flower initiation and open flowering",
            irrigation_frequency: "Critical period - irrigate every 7 days",
            activities: &[
                "Monitor flowering progress",
                "Scout for pod borers and aphids",
                "Ensure adequate bee activity for pollination",
            ],
            fertilizers: &["Foliar spray of boron and molybdenum if deficiency observed"],
            weather: "Water stress during flowering significantly reduces yield",
            risks: &["Flower drop due to stress", "Aphids", "Pod borers"],
        },
        StageTemplate {
            name: "Pod Formation (R3-R4)",
            duration_days: 15,
            description: "Pods form and seeds begin to develop",
            irrigation_frequency: "Most critical - irrigate every 5-7 days if no rain",
            activities: &[
                "Monitor pod set",
                "Protect from pod-boring insects",
                "Ensure good plant health",
            ],
            fertilizers: &["Foliar spray of potassium for better pod filling"],
            weather: "Adequate moisture essential for pod formation",
            risks: &["Pod abortion due to stress", "Pod borer damage", "Pod shedding"],
        },
        StageTemplate {
            name: "Seed Filling (R5-R6)",
            duration_days: 20,
            description: "Seeds develop and fill within pods",
            irrigation_frequency: "Irrigate every 7-10 days, reduce towards maturity",
            activities: &[
                "Monitor seed development",
                "Protect from birds and pod feeders",
                "Scout for late season diseases",
            ],
            fertilizers: &["No additional fertilizer typically needed"],
            weather: "Adequate moisture needed for proper seed filling",
            risks: &["Shriveled seeds due to stress", "Stink bugs", "Seed rot"],
        },
        StageTemplate {
            name: "Maturity & Harvest (R7-R8)",
            duration_days: 12,
            description: "Plants mature and pods ready for harvest",
            irrigation_frequency: "Stop irrigation 10-15 days before harvest",
            activities: &[
                "Monitor pod color (brown when mature)",
                "Harvest when moisture is 13-15%",
                "Prepare combine or threshing equipment",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather ideal for harvest",
            risks: &["Pod shattering", "Harvest delays due to rain", "Seed quality loss"],
        },
    ],
    care_tips: &[
        "Ensure good rhizobium nodulation for nitrogen fixation",
        "Scout regularly for pod-boring insects",
        "Maintain weed-free fields for maximum yield",
        "Harvest at proper moisture to reduce shattering",
    ],
    harvest_indicators: &[
        "95% of pods are brown or tan in color",
        "Seeds rattle in pods when shaken",
        "Grain moisture is 13-15%",
        "Leaves have dropped from most plants",
    ],
};

static SUGARCANE: CropCalendar = CropCalendar {
    name: "Sugarcane",
    total_days: 300,
    stages: &[
        StageTemplate {
            name: "Germination & Establishment",
            duration_days: 30,
            description: "Bud sprouting and shoot emergence",
            irrigation_frequency: "Light irrigation every 3-5 days until establishment",
            activities: &[
                "Plant 2-3 budded setts in furrows",
                "Apply mulch to conserve moisture",
                "Monitor for uniform sprouting",
            ],
            fertilizers: &["Apply basal fertilizer in furrows before planting"],
            weather: "Warm, moist conditions promote sprouting",
            risks: &["Poor germination", "Sett rot", "Termite damage"],
        },
        StageTemplate {
            name: "Tillering",
            duration_days: 60,
            description: "Production of multiple shoots from each sett",
            irrigation_frequency: "Irrigate every 7-10 days",
            activities: &[
                "First weeding and earthing up at 30-40 days",
                "Remove excess tillers if overcrowded",
                "Monitor for early shoot borer",
            ],
            fertilizers: &["Apply first dose of nitrogen (30% of total) at 30-40 days"],
            weather: "Adequate moisture and warm temperature promote tillering",
            risks: &["Early shoot borer", "Weed competition", "Root borer"],
        },
        StageTemplate {
            name: "Grand Growth Phase",
            duration_days: 120,
            description: "Rapid vertical growth and biomass accumulation",
            irrigation_frequency: "Regular irrigation every 10-15 days",
            activities: &[
                "Second dose of fertilizer application",
                "Weeding and inter-cultivation",
                "Monitor for stem borer and top borer",
                "De-trashing (removal of dry leaves) if needed",
            ],
            fertilizers: &[
                "Apply second nitrogen dose (40% of total) at 90-120 days",
                "Apply final nitrogen dose (30% of total) at 150-180 days",
            ],
            weather: "High temperature and long days promote rapid growth",
            risks: &["Stem borer", "Top borer", "Red rot disease", "Smut"],
        },
        StageTemplate {
            name: "Maturation",
            duration_days: 60,
            description: "Sugar accumulation in stems",
            irrigation_frequency: "Reduce irrigation frequency, stop 2-3 weeks before harvest",
            activities: &[
                "Monitor sugar content (brix levels)",
                "Plan harvest schedule",
                "Remove flowering tops if present",
            ],
            fertilizers: &["No fertilizer application during maturation"],
            weather: "Dry weather and cool nights enhance sugar accumulation",
            risks: &[
                "Flowering (reduces sugar content)",
                "Lodging",
                "Pests damaging mature cane",
            ],
        },
        StageTemplate {
            name: "Harvest",
            duration_days: 30,
            description: "Cutting and transportation to mill",
            irrigation_frequency: "No irrigation",
            activities: &[
                "Cut cane close to ground level",
                "Remove tops and trash",
                "Transport to mill within 24-48 hours",
            ],
            fertilizers: &["No fertilizer application"],
            weather: "Dry weather preferred for harvest operations",
            risks: &[
                "Delay in crushing (sugar loss)",
                "Post-harvest deterioration",
                "Stubble damage",
            ],
        },
    ],
    care_tips: &[
        "Regular de-trashing improves air circulation and reduces pests",
        "Monitor for borers throughout the season",
        "Proper drainage is essential to prevent waterlogging",
        "Timely harvest and crushing maximize sugar recovery",
    ],
    harvest_indicators: &[
        "Cane is 10-12 months old (seasonal crop)",
        "Brix reading is 18% or higher",
        "Internodes are mature and hard",
        "Lower leaves have dried",
    ],
};
