//! Step-by-step text report of a CSE calculation

use crate::assumptions::CalculationParams;
use crate::calculation::{ComputationResult, IncomeTreatment};
use std::fmt;

const WIDE_RULE: usize = 70;
const NARROW_RULE: usize = 50;

/// Format an amount in whole pesos with thousands separators ("$1,039,228")
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

fn income_note(treatment: IncomeTreatment, counted: f64) -> String {
    match treatment {
        IncomeTreatment::ExcludedMinor => " (excluido por ser menor de 18)".to_string(),
        IncomeTreatment::StudentExcess => {
            format!(" (estudia 18-24: se considera {})", format_amount(counted))
        }
        IncomeTreatment::StudentBelowThreshold => {
            " (estudia 18-24: no supera 2 salarios mínimos, no se considera)".to_string()
        }
        IncomeTreatment::Full => String::new(),
    }
}

/// Step-by-step report of one calculation, rendered through `Display`
pub struct Report<'a> {
    result: &'a ComputationResult,
    params: &'a CalculationParams,
}

impl<'a> Report<'a> {
    pub fn new(result: &'a ComputationResult, params: &'a CalculationParams) -> Self {
        Self { result, params }
    }
}

/// Render the full report
pub fn render(result: &ComputationResult, params: &CalculationParams) -> String {
    Report::new(result, params).to_string()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.result;
        let params = self.params;

        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out, "   RESULTADO - CALIFICACIÓN SOCIOECONÓMICA (CSE)")?;
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out)?;

        writeln!(out, "PASO 1: INGRESO EQUIVALENTE DEL HOGAR")?;
        writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
        for c in &r.income_breakdown {
            writeln!(out, "  {} ({} años):", c.name, c.age)?;
            writeln!(
                out,
                "    Trabajo: {:>13}  |  Pensión: {:>13}  |  Capital: {:>13}{}",
                format_amount(c.income_work),
                format_amount(c.income_pension),
                format_amount(c.income_capital),
                income_note(c.treatment, c.counted)
            )?;
        }
        writeln!(out)?;
        writeln!(out, "  >> Ingreso equivalente del hogar = {}", format_amount(r.equivalent_income))?;
        writeln!(out)?;

        writeln!(out, "PASO 2: ÍNDICE DE NECESIDADES (IN)")?;
        writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
        writeln!(out, "  Número de integrantes (N): {}", r.member_count)?;
        writeln!(
            out,
            "  N^{} = {}^{} = {:.8}",
            params.scale_factor, r.member_count, params.scale_factor, r.size_component
        )?;
        writeln!(out)?;
        for row in &r.coefficient_breakdown {
            let condition = row.condition.map(|c| c.label()).unwrap_or("Sin condición registrada");
            writeln!(out, "  {} ({} años) - {}", row.name, row.age, condition)?;
            writeln!(out, "    Rango: {} | Coeficiente Y = {:.2}", row.band.as_str(), row.coefficient)?;
        }
        writeln!(out)?;
        writeln!(
            out,
            "  IN = {:.8} + {:.2} = {:.8}",
            r.size_component, r.coefficient_sum, r.needs_index
        )?;
        writeln!(out)?;
        writeln!(out, "  >> Índice de necesidades = {:.8}", r.needs_index)?;
        writeln!(out)?;

        writeln!(out, "PASO 3: INGRESO EQUIVALENTE CORREGIDO")?;
        writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
        writeln!(out, "  Ingreso equivalente / Índice de necesidades")?;
        writeln!(out, "  = {} / {:.8}", format_amount(r.equivalent_income), r.needs_index)?;
        writeln!(out)?;
        writeln!(out, "  >> Ingreso equivalente corregido = {}", format_amount(r.corrected_income))?;
        writeln!(out)?;

        writeln!(out, "PASO 4: TRAMO POR INGRESOS")?;
        writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
        writeln!(out, "  >> Tramo inicial por ingresos = {} de la CSE", r.income_tier)?;
        writeln!(out)?;

        writeln!(out, "PASO 5: TEST DE MEDIOS (FACTORES DE REORDENAMIENTO)")?;
        writeln!(out, "{}", "-".repeat(NARROW_RULE))?;
        if r.activated_means_count == 0 {
            writeln!(out, "  No se activaron test de medios.")?;
        } else {
            writeln!(out, "  Medios activos: {}", r.activated_means_count)?;
            for detail in &r.activation_detail {
                writeln!(out, "    - {detail}")?;
            }
            writeln!(out)?;
            writeln!(out, "  >> Tramo inferido por test de medios = {} de la CSE", r.means_test_tier)?;
        }
        writeln!(out)?;

        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out, "  TRAMO FINAL DE LA CSE: {}", r.final_tier)?;
        writeln!(out, "{}", "=".repeat(WIDE_RULE))?;
        writeln!(out)?;
        writeln!(out, "  Clasificación: {}", r.classification().description())?;
        if let Some(description) = r.final_tier.description() {
            writeln!(out, "  {description}")?;
        }

        Ok(())
    }
}
