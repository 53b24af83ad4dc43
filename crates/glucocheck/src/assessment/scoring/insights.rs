use super::super::domain::{GlucoseMonitoring, MedicationFrequency};

pub fn glucose_insight(monitoring: GlucoseMonitoring) -> &'static str {
    match monitoring {
        GlucoseMonitoring::Every12Hours => "Su frecuencia de monitoreo de glucosa es excelente. Monitorear cada 12 horas le permite tener un control detallado de sus niveles durante el día y la noche, facilitando ajustes rápidos en su tratamiento cuando sea necesario. Esta práctica es fundamental para prevenir complicaciones a largo plazo.",
        GlucoseMonitoring::EveryDay => "Monitorear su glucosa diariamente es un buen hábito. Para optimizar su control, considere aumentar la frecuencia a dos veces al día (mañana y noche) para entender mejor cómo su cuerpo responde a los alimentos, actividades y medicamentos a lo largo del día.",
        GlucoseMonitoring::Rarely => "El monitoreo poco frecuente de glucosa limita su capacidad para controlar efectivamente su diabetes. Sin información regular sobre sus niveles, es difícil hacer ajustes oportunos en su tratamiento. Recomendamos encarecidamente aumentar la frecuencia a al menos una vez al día, idealmente por la mañana en ayunas.",
    }
}

pub fn medication_insight(frequency: MedicationFrequency) -> &'static str {
    match frequency {
        MedicationFrequency::Daily => "Su compromiso con la toma diaria de medicación es excelente y fundamental para el control efectivo de la diabetes. Esta adherencia consistente ayuda a mantener niveles estables de glucosa y reduce significativamente el riesgo de complicaciones a largo plazo.",
        MedicationFrequency::AlmostAlways => "Aunque toma su medicación con bastante regularidad, las dosis ocasionalmente omitidas pueden afectar el control de su glucosa. Intente identificar las razones de estos olvidos y establezca sistemas (como alarmas o asociación con rutinas diarias) para alcanzar una adherencia completa.",
        MedicationFrequency::Rarely => "La baja adherencia a la medicación es una preocupación importante. Sin la medicación adecuada, el riesgo de complicaciones aumenta significativamente. Es crucial entender que la medicación para la diabetes no es opcional sino esencial para su salud. Hable con su médico sobre las dificultades que experimenta y explore opciones de tratamiento que puedan ser más fáciles de seguir.",
    }
}
