//! Static reference content shown in the science view and embedded in prompts.

use crate::i18n::Language;

#[derive(Debug, Clone, Copy)]
pub struct Bilingual {
    pub es: &'static str,
    pub en: &'static str,
}

impl Bilingual {
    pub fn get(&self, language: Language) -> &'static str {
        match language {
            Language::Es => self.es,
            Language::En => self.en,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GeneticMarker {
    pub id: &'static str,
    pub label: &'static str,
    pub desc: Bilingual,
}

pub const GENETIC_MARKERS: &[GeneticMarker] = &[
    GeneticMarker {
        id: "FTO",
        label: "FTO (rs9939609)",
        desc: Bilingual {
            es: "Asociado a mayor apetito y preferencia por alimentos densos en energía.",
            en: "Associated with increased appetite and preference for energy-dense foods.",
        },
    },
    GeneticMarker {
        id: "MC4R",
        label: "MC4R (rs17782313)",
        desc: Bilingual {
            es: "Relacionado con la regulación de la ingesta y riesgo de obesidad mórbida.",
            en: "Linked to intake regulation and risk of morbid obesity.",
        },
    },
    GeneticMarker {
        id: "PPARG",
        label: "PPARG (Pro12Ala)",
        desc: Bilingual {
            es: "Influye en la sensibilidad a la insulina y el metabolismo de ácidos grasos.",
            en: "Influences insulin sensitivity and fatty acid metabolism.",
        },
    },
    GeneticMarker {
        id: "APOE",
        label: "APOE (ε4)",
        desc: Bilingual {
            es: "Marcador de riesgo cardiovascular elevado y metabolismo lipídico alterado.",
            en: "Marker of elevated cardiovascular risk and altered lipid metabolism.",
        },
    },
    GeneticMarker {
        id: "ADRB2",
        label: "ADRB2 (Gly16Arg)",
        desc: Bilingual {
            es: "Afecta la movilización de grasas durante el ejercicio físico.",
            en: "Affects fat mobilisation during physical exercise.",
        },
    },
];

pub fn find_genetic_marker(id: &str) -> Option<&'static GeneticMarker> {
    GENETIC_MARKERS
        .iter()
        .find(|marker| marker.id.eq_ignore_ascii_case(id))
}

pub const MEDICATIONS_IMPACT: &[Bilingual] = &[
    Bilingual {
        es: "Corticoides (Prednisona, etc.) - Pueden causar retención de líquidos y aumento de glucemia.",
        en: "Corticosteroids (Prednisone, etc.) - May cause fluid retention and raised blood glucose.",
    },
    Bilingual {
        es: "Antidepresivos (ISRS, Tricíclicos) - Algunos pueden alterar el centro del hambre.",
        en: "Antidepressants (SSRIs, tricyclics) - Some can alter the hunger centre.",
    },
    Bilingual {
        es: "Antipsicóticos de 2ª generación - Alto riesgo metabólico.",
        en: "Second-generation antipsychotics - High metabolic risk.",
    },
    Bilingual {
        es: "Betabloqueantes - Pueden reducir ligeramente la tasa metabólica basal.",
        en: "Beta blockers - May slightly reduce basal metabolic rate.",
    },
    Bilingual {
        es: "Insulina o Sulfonilureas - Riesgo de hipoglucemia y ganancia ponderal si no se ajusta la dieta.",
        en: "Insulin or sulfonylureas - Risk of hypoglycaemia and weight gain if the diet is not adjusted.",
    },
];

pub struct ScientificReferences {
    pub diets: Bilingual,
    pub nutritional_tables: Bilingual,
    pub cv_risk: Bilingual,
    pub medications: Bilingual,
}

pub const SCIENTIFIC_REFERENCES: ScientificReferences = ScientificReferences {
    diets: Bilingual {
        es: "Basado en guías de la OMS, FESNAD (Federación Española de Sociedades de Nutrición, Alimentación y Dietética) y el consenso SEEDO (Sociedad Española para el Estudio de la Obesidad).",
        en: "Based on WHO guidelines, FESNAD (Spanish Federation of Nutrition, Food and Dietetics Societies) and the SEEDO consensus (Spanish Society for the Study of Obesity).",
    },
    nutritional_tables: Bilingual {
        es: "Tablas de composición de alimentos BEDCA (Base de Datos Española de Composición de Alimentos) y USDA.",
        en: "Food composition tables from BEDCA (Spanish Food Composition Database) and USDA.",
    },
    cv_risk: Bilingual {
        es: "Cálculo del Riesgo Cardiovascular mediante el Índice Cintura/Talla (ICT). Un ICT > 0.5 se asocia a mayor riesgo metabólico y CV independientemente del IMC.",
        en: "Cardiovascular risk estimated from the Waist-to-Height Ratio (WHtR). A WHtR > 0.5 is associated with higher metabolic and CV risk regardless of BMI.",
    },
    medications: Bilingual {
        es: "Interacciones fármaco-alimento según el Catálogo de Medicamentos (Consejo General de Colegios Oficiales de Farmacéuticos).",
        en: "Drug-food interactions per the Medicines Catalogue (Spanish General Council of Pharmacists).",
    },
};
