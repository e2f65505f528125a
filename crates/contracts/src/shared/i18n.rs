//! Locale handling and the message catalog shared by frontend and form logic.
//!
//! Arabic is the default locale and is laid out right-to-left.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ar,
    En,
}

/// Text direction of a locale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::Ar, Locale::En];

    pub fn code(&self) -> &'static str {
        match self {
            Locale::Ar => "ar",
            Locale::En => "en",
        }
    }

    pub fn dir(&self) -> Direction {
        match self {
            Locale::Ar => Direction::Rtl,
            Locale::En => Direction::Ltr,
        }
    }

    /// Parse a language tag ("en", "en-US", "ar-EG"); anything unknown falls back to Arabic.
    pub fn from_code(code: &str) -> Self {
        let primary = code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match primary.as_str() {
            "en" => Locale::En,
            _ => Locale::Ar,
        }
    }

    /// Name of the language in itself, for the language switcher
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Ar => "العربية",
            Locale::En => "English",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Locale::Ar => Locale::En,
            Locale::En => Locale::Ar,
        }
    }
}

// (key, english, arabic)
const MESSAGES: &[(&str, &str, &str)] = &[
    // Application
    ("app.title", "Water Reception Operations", "عمليات استقبال المياه"),
    ("app.company", "Petrotreatment for Petroleum and Environmental Services", "بتروتريتمنت للخدمات البترولية والبيئية"),
    // Navigation
    ("nav.dashboard", "Dashboard", "لوحة التحكم"),
    ("nav.newReception", "New reception", "استقبال جديد"),
    ("nav.receptions", "Receptions", "سجل الاستقبال"),
    ("nav.reports", "Reports", "التقارير"),
    ("nav.logout", "Logout", "تسجيل الخروج"),
    // Login
    ("login.title", "Sign in", "تسجيل الدخول"),
    ("login.username", "Username", "اسم المستخدم"),
    ("login.password", "Password", "كلمة المرور"),
    ("login.submit", "Sign in", "دخول"),
    ("login.loading", "Signing in...", "جاري الدخول..."),
    ("login.failed", "Invalid username or password", "اسم المستخدم أو كلمة المرور غير صحيحة"),
    // Common
    ("common.back", "Back", "رجوع"),
    ("common.cancel", "Cancel", "إلغاء"),
    ("common.refresh", "Refresh", "تحديث"),
    ("common.delete", "Delete", "حذف"),
    ("common.loading", "Loading...", "جاري التحميل..."),
    ("common.error", "Error", "خطأ"),
    ("common.noData", "No data", "لا توجد بيانات"),
    ("common.confirmDelete", "Delete this reception?", "هل تريد حذف هذا الاستقبال؟"),
    // Form labels
    ("form.addNewEnhanced", "New vehicle reception", "إضافة استقبال مركبات جديد"),
    ("form.receptionSummary", "Reception details", "تفاصيل الاستقبال"),
    ("form.date", "Date", "التاريخ"),
    ("form.company", "Company", "الشركة"),
    ("form.selectCompany", "Select company", "اختر الشركة"),
    ("form.customCompany", "Enter company name", "أدخل اسم الشركة"),
    ("form.waterType", "Water type", "نوع المياه"),
    ("form.selectWaterType", "Select water type", "اختر نوع المياه"),
    ("form.customWaterType", "Enter water type", "أدخل نوع المياه"),
    ("form.quantity", "Total quantity", "الكمية الإجمالية"),
    ("form.autoCalculated", "auto-calculated", "محسوبة تلقائياً"),
    ("form.arrivalTime", "Arrival time", "وقت الوصول"),
    ("form.departureTime", "Departure time", "وقت المغادرة"),
    ("form.exitTime", "Exit time from drilling site", "وقت الخروج من موقع الحفر"),
    ("form.invoiceNumber", "Invoice number", "رقم الفاتورة"),
    ("form.cuttingBoxes", "Cutting boxes amount", "كمية صناديق القطع"),
    ("form.notes", "Notes", "ملاحظات"),
    ("form.notesPlaceholder", "Additional notes (optional)", "ملاحظات إضافية (اختياري)"),
    ("form.vehicleDetails", "Vehicles", "تفاصيل المركبات"),
    ("form.vehicle", "Vehicle", "مركبة"),
    ("form.addVehicle", "Add vehicle", "إضافة مركبة"),
    ("form.removeVehicle", "Remove", "إزالة"),
    ("form.vehicleNumber", "Vehicle number", "رقم المركبة"),
    ("form.vehicleType", "Vehicle type", "نوع المركبة"),
    ("form.selectVehicleType", "Select vehicle type", "اختر نوع المركبة"),
    ("form.driverName", "Driver name", "اسم السائق"),
    ("form.carBrand", "Brand", "الماركة"),
    ("form.vehicleQuantity", "Quantity (m³)", "الكمية (م³)"),
    ("form.totalVehicles", "Vehicles", "عدد المركبات"),
    ("form.vehiclesList", "Vehicle list", "قائمة المركبات"),
    ("form.review", "Review", "مراجعة"),
    ("form.confirmSubmission", "Confirm submission", "تأكيد الإرسال"),
    ("form.create", "Create", "إنشاء"),
    ("form.saving", "Saving...", "جاري الحفظ..."),
    ("form.created", "Reception created", "تم إنشاء الاستقبال"),
    ("form.receptionNumber", "Reception number", "رقم الاستقبال"),
    ("form.newAnother", "Record another", "تسجيل استقبال آخر"),
    ("form.submitFailed", "Submission failed", "فشل الإرسال"),
    // Validation
    ("form.dateRequired", "Date is required", "التاريخ مطلوب"),
    ("form.dateInvalid", "Date must be YYYY-MM-DD", "صيغة التاريخ غير صحيحة"),
    ("form.companyRequired", "Company is required", "الشركة مطلوبة"),
    ("form.waterTypeRequired", "Water type is required", "نوع المياه مطلوب"),
    ("form.timeInvalid", "Time must be HH:MM", "صيغة الوقت غير صحيحة"),
    ("form.timeOrder", "Departure time must be after arrival time", "يجب أن يكون وقت المغادرة بعد وقت الوصول"),
    ("form.vehicleNumberRequired", "Vehicle number is required", "رقم المركبة مطلوب"),
    ("form.vehicleTypeRequired", "Vehicle type is required", "نوع المركبة مطلوب"),
    ("form.driverNameRequired", "Driver name is required", "اسم السائق مطلوب"),
    ("form.carBrandRequired", "Brand is required", "الماركة مطلوبة"),
    ("form.vehicleQuantityRequired", "Quantity is required", "الكمية مطلوبة"),
    ("form.quantityMin", "Quantity cannot be negative", "لا يمكن أن تكون الكمية سالبة"),
    ("form.amountInvalid", "Amount must be a non-negative number", "يجب أن تكون القيمة رقماً موجباً"),
    // Table
    ("table.receptionNumber", "No.", "الرقم"),
    ("table.day", "Day", "اليوم"),
    ("table.vehicles", "Vehicles", "المركبات"),
    ("table.filterCompany", "Filter by company", "تصفية حسب الشركة"),
    ("table.filterWaterType", "Filter by water type", "تصفية حسب نوع المياه"),
    ("table.dateFrom", "From", "من"),
    ("table.dateTo", "To", "إلى"),
    ("table.sortBy", "Sort by", "ترتيب حسب"),
    ("table.createdAt", "Created", "تاريخ الإنشاء"),
    ("table.page", "Page", "صفحة"),
    ("table.of", "of", "من"),
    ("table.prev", "Previous", "السابق"),
    ("table.next", "Next", "التالي"),
    // Dashboard
    ("dashboard.totalReceptions", "Total receptions", "إجمالي الاستقبالات"),
    ("dashboard.totalVehicles", "Total vehicles", "إجمالي المركبات"),
    ("dashboard.totalQuantity", "Total quantity (m³)", "إجمالي الكمية (م³)"),
    ("dashboard.companies", "Companies", "الشركات"),
    ("dashboard.waterTypes", "Water types", "أنواع المياه"),
    // Reports
    ("reports.title", "Reports", "التقارير"),
    ("reports.startDate", "Start date", "تاريخ البداية"),
    ("reports.endDate", "End date", "تاريخ النهاية"),
    ("reports.type", "Report type", "نوع التقرير"),
    ("reports.daily", "Daily", "يومي"),
    ("reports.weekly", "Weekly", "أسبوعي"),
    ("reports.monthly", "Monthly", "شهري"),
    ("reports.summary", "Show summary", "عرض الملخص"),
    ("reports.download", "Download CSV", "تحميل CSV"),
    ("reports.financial", "Financial report", "التقرير المالي"),
    ("reports.days", "Days", "الأيام"),
    ("reports.vehiclesPerDay", "Vehicles per day", "المركبات يومياً"),
    ("reports.quantityPerDay", "Quantity per day", "الكمية يومياً"),
    ("reports.rate", "Rate per m³", "السعر لكل م³"),
    ("reports.cost", "Cost", "التكلفة"),
    ("reports.count", "Receptions", "عدد الاستقبالات"),
    ("reports.totalCost", "Total cost", "إجمالي التكلفة"),
    ("reports.total", "Total", "الإجمالي"),
    ("reports.volume", "Volume (m³)", "الحجم (م³)"),
    ("reports.currency", "Currency", "العملة"),
    ("reports.totalsByCurrency", "Totals by currency", "الإجمالي حسب العملة"),
    ("reports.rates", "Company rates", "أسعار الشركات"),
    ("reports.defaultRate", "Default rate", "السعر الافتراضي"),
    ("reports.anyWaterType", "Any water type", "أي نوع مياه"),
    // Access
    ("auth.adminOnly", "Available to administrators only", "متاح للمسؤولين فقط"),
];

/// Look up a message; unknown keys come back unchanged.
pub fn t(locale: Locale, key: &str) -> &str {
    MESSAGES
        .iter()
        .find(|(k, _, _)| *k == key)
        .map(|(_, en, ar)| match locale {
            Locale::En => *en,
            Locale::Ar => *ar,
        })
        .unwrap_or(key)
}

/// Weekday name as stored by the backend ("Monday"), localized for display
pub fn weekday_label(locale: Locale, english_name: &str) -> String {
    if locale == Locale::En {
        return english_name.to_string();
    }
    match english_name {
        "Saturday" => "السبت",
        "Sunday" => "الأحد",
        "Monday" => "الإثنين",
        "Tuesday" => "الثلاثاء",
        "Wednesday" => "الأربعاء",
        "Thursday" => "الخميس",
        "Friday" => "الجمعة",
        other => other,
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arabic_is_default_and_rtl() {
        assert_eq!(Locale::default(), Locale::Ar);
        assert_eq!(Locale::Ar.dir(), Direction::Rtl);
        assert_eq!(Locale::En.dir().as_str(), "ltr");
    }

    #[test]
    fn from_code_falls_back_to_arabic() {
        assert_eq!(Locale::from_code("en-US"), Locale::En);
        assert_eq!(Locale::from_code("EN"), Locale::En);
        assert_eq!(Locale::from_code("ar_EG"), Locale::Ar);
        assert_eq!(Locale::from_code("undefined"), Locale::Ar);
        assert_eq!(Locale::from_code(""), Locale::Ar);
    }

    #[test]
    fn lookup_returns_locale_text_or_key() {
        assert_eq!(t(Locale::En, "form.date"), "Date");
        assert_eq!(t(Locale::Ar, "form.date"), "التاريخ");
        assert_eq!(t(Locale::En, "missing.key"), "missing.key");
    }

    #[test]
    fn catalog_keys_are_unique() {
        let mut keys: Vec<&str> = MESSAGES.iter().map(|(k, _, _)| *k).collect();
        keys.sort_unstable();
        let before = keys.len();
        keys.dedup();
        assert_eq!(before, keys.len());
    }

    #[test]
    fn weekday_labels() {
        assert_eq!(weekday_label(Locale::En, "Friday"), "Friday");
        assert_eq!(weekday_label(Locale::Ar, "Friday"), "الجمعة");
    }
}
