//! Catalogue of supported integration targets.
//!
//! Pure data: one entry per [`WebhookType`], looked up by type and never
//! mutated. The briefing, use cases and setup steps are shown to the user
//! while they create a webhook and have no effect on delivery.

use serde::Serialize;

use crate::model::{WebhookSettings, WebhookType};

/// Settings a new webhook of this type starts from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefaults {
    pub retry_count: u32,
    /// Milliseconds.
    pub timeout: u64,
    pub include_details: bool,
}

impl TemplateDefaults {
    pub fn to_settings(self) -> WebhookSettings {
        WebhookSettings {
            retry_count: Some(self.retry_count),
            timeout: Some(self.timeout),
            include_details: Some(self.include_details),
            ..Default::default()
        }
    }
}

const CHAT: TemplateDefaults = TemplateDefaults {
    retry_count: 3,
    timeout: 5000,
    include_details: true,
};

const AUTOMATION: TemplateDefaults = TemplateDefaults {
    retry_count: 2,
    timeout: 10000,
    include_details: true,
};

const CUSTOM: TemplateDefaults = TemplateDefaults {
    retry_count: 2,
    timeout: 10000,
    include_details: false,
};

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookTemplate {
    #[serde(rename = "type")]
    pub kind: WebhookType,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub briefing: &'static str,
    pub use_cases: &'static [&'static str],
    pub default_settings: TemplateDefaults,
    pub setup_instructions: &'static [&'static str],
    pub example_url: &'static str,
}

/// Every template, in display order.
pub fn all() -> &'static [WebhookTemplate] {
    TEMPLATES
}

pub fn find(kind: WebhookType) -> Option<&'static WebhookTemplate> {
    TEMPLATES.iter().find(|t| t.kind == kind)
}

static TEMPLATES: &[WebhookTemplate] = &[
    WebhookTemplate {
        kind: WebhookType::Slack,
        name: "Slack",
        description: "Takım kanalına bildirim gönder",
        icon: "💬",
        briefing: "Slack, dünya çapında milyonlarca kişinin kullandığı bir takım iletişim platformudur. EchoDay görevlerinizi otomatik olarak Slack kanallarınıza bildirerek takımınızı her zaman bilgilendirebilirsiniz.",
        use_cases: &[
            "Tamamlanan görevleri takım kanalına bildir",
            "Günlük özeti her sabah paylaş",
            "Önemli hatırlatıcıları bildir",
            "Proje ilerlemesini güncel tut",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. Tarayıcınızda https://slack.com/apps sayfasını açın (Slack hesabınıza giriş yapın)",
            "2. Arama kutusuna \"Incoming Webhooks\" yazın ve çıkan sonuca tıklayın",
            "3. Yeşil \"Add to Slack\" butonunu bulun ve tıklayın",
            "4. Açılan menüden bildirimlerin gönderileceği kanalı seçin",
            "5. \"Add Incoming WebHooks integration\" veya \"Allow\" butonuna tıklayın",
            "6. Sayfada görünen uzun URL'i kopyalayın (https://hooks.slack.com/... ile başlar)",
            "7. Kopyaladığınız URL'i \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://hooks.slack.com/services/T{workspace}/B{channel}/XXXXXXXXXXXXXXXXXXXXXXXX",
    },
    WebhookTemplate {
        kind: WebhookType::Discord,
        name: "Discord",
        description: "Discord sunucuna mesaj gönder",
        icon: "🎮",
        briefing: "Discord, oyuncular ve topluluklar için popüler bir sohbet platformudur. Görevlerinizi Discord sunucunuza otomatik olarak göndererek topluluğunuzu bilgilendirebilirsiniz.",
        use_cases: &[
            "Proje güncellemelerini toplulukla paylaş",
            "Tamamlanan görevleri duyur",
            "Haftalık raporları otomatik paylaş",
            "Takım koordinasyonunu kolaylaştır",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. Discord uygulamasını açın ve webhook eklemek istediğiniz sunucuya gidin",
            "2. Bildirim göndermek istediğiniz kanalın yanındaki dişli çark (ayarlar) ikonuna tıklayın",
            "3. Sol menüden \"Integrations\" (Entegrasyonlar) sekmesini bulun ve tıklayın",
            "4. \"Webhooks\" bölümünü bulun ve \"New Webhook\" (Yeni Webhook) butonuna tıklayın",
            "5. Webhook'a bir isim verin (isteğe bağlı olarak profil resmi ekleyebilirsiniz)",
            "6. \"Copy Webhook URL\" butonuna tıklayarak URL'i panoya kopyalayın",
            "7. Kopyaladığınız URL'i \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://discord.com/api/webhooks/YOUR_WEBHOOK_ID/YOUR_WEBHOOK_TOKEN",
    },
    WebhookTemplate {
        kind: WebhookType::Telegram,
        name: "Telegram",
        description: "Telegram bot ile mesaj gönder",
        icon: "✈️",
        briefing: "Telegram, hızlı ve güvenli bir mesajlaşma uygulamasıdır. Kendi botunuzu oluşturarak EchoDay bildirimlerini doğrudan Telegram'a alabilirsiniz.",
        use_cases: &[
            "Kişisel hatırlatıcıları telefona gönder",
            "Günlük özeti sabah oku",
            "Acil görevleri anında bildir",
            "Mobil bildirim sistemi kur",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. Telegram uygulamasını açın ve arama kutusuna \"BotFather\" yazın",
            "2. Mavi tikli resmi BotFather hesabını bulun ve sohbeti açın",
            "3. Sohbet kutusuna \"/newbot\" yazıp gönderin",
            "4. BotFather size bot adı soracak (ör: \"EchoDay Bildirici\")",
            "5. Sonra kullanıcı adı soracak, mutlaka \"bot\" ile bitmelidir (ör: \"echoday_notifier_bot\")",
            "6. BotFather size uzun bir token verecek (ör: 123456:ABC-DEF...), bu token'ı kopyalayın",
            "7. Bot'a mesaj gönderip chat_id alın (detay için: https://t.me/username_to_id_bot)",
        ],
        example_url: "https://api.telegram.org/botYOUR_BOT_TOKEN/sendMessage",
    },
    WebhookTemplate {
        kind: WebhookType::Teams,
        name: "Microsoft Teams",
        description: "Teams kanalına bildirim gönder",
        icon: "👥",
        briefing: "Microsoft Teams, kurumsal takımlar için güçlü bir iş birliği platformudur. EchoDay görevlerinizi Teams kanallarınıza otomatik olarak göndererek takımınızı senkronize tutun.",
        use_cases: &[
            "Kurumsal proje güncellemeleri",
            "Toplantı hatırlatmaları",
            "Takım performans raporları",
            "İş akışı bildirimleri",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. Microsoft Teams uygulamasını açın ve webhook eklemek istediğiniz kanalı bulun",
            "2. Kanal adının yanındaki üç nokta (...) menüsüne tıklayın",
            "3. Açılan menüden \"Connectors\" (Bağlayıcılar) seçeneğini tıklayın",
            "4. \"Incoming Webhook\" arayın ve \"Configure\" (Yapılandır) butonuna tıklayın",
            "5. Webhook'a anlamlı bir isim verin (isteğe bağlı: bir resim de yükleyebilirsiniz)",
            "6. \"Create\" (Oluştur) butonuna tıklayın, ekranda uzun bir URL göreceksiniz",
            "7. Görünen URL'i kopyalayın ve \"Done\" (Tamam) butonuna basın",
        ],
        example_url: "https://outlook.office.com/webhook/xxx/IncomingWebhook/xxx",
    },
    WebhookTemplate {
        kind: WebhookType::Zapier,
        name: "Zapier",
        description: "5000+ uygulama ile entegrasyon",
        icon: "⚡",
        briefing: "Zapier, 5000'den fazla uygulamayı birbirine bağlayan güçlü bir otomasyon platformudur. EchoDay görevlerinizi Gmail, Sheets, CRM ve daha fazlasıyla entegre edin.",
        use_cases: &[
            "Tamamlanan görevleri Google Sheets'e ekle",
            "Yeni görevi Gmail ile paylaş",
            "CRM'e otomatik görev aktar",
            "Binlerce farklı uygulama ile entegre ol",
        ],
        default_settings: AUTOMATION,
        setup_instructions: &[
            "1. https://zapier.com/app/zaps adresini açın (hesabınız yoksa ücretsiz kayıt olun)",
            "2. Sağ üstteki \"Create Zap\" (Zap Oluştur) butonuna tıklayın",
            "3. \"Trigger\" bölümünde \"Webhooks by Zapier\" bulun ve seçin",
            "4. Event tipi olarak \"Catch Hook\" seçin ve \"Continue\" deyin",
            "5. Zapier size özel bir webhook URL verecek, bu URL'i kopyalayın",
            "6. \"Action\" kısmında verileri göndermek istediğiniz uygulamayı seçin (Gmail, Sheets, vb.)",
            "7. Kopyaladığınız webhook URL'ini \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://hooks.zapier.com/hooks/catch/YOUR_HOOK_ID/YOUR_HOOK_KEY/",
    },
    WebhookTemplate {
        kind: WebhookType::Make,
        name: "Make (Integromat)",
        description: "Görsel otomasyon platformu",
        icon: "🧩",
        briefing: "Make (eski adıyla Integromat), sürükle-bırak arayüzü ile karmaşık otomasyon senaryoları oluşturmanızı sağlar. EchoDay verilerinizi görsel iş akışlarıyla işleyin.",
        use_cases: &[
            "Karmaşık iş akışları oluştur",
            "Çoklu uygulama entegrasyonu",
            "Veri dönüştürme ve işleme",
            "Şartlı otomasyon senaryoları",
        ],
        default_settings: AUTOMATION,
        setup_instructions: &[
            "1. https://www.make.com/en/login adresini açın ve hesabınıza giriş yapın",
            "2. \"Create a new scenario\" (Yeni Senaryo Oluştur) butonuna tıklayın",
            "3. Boş canvas üzerindeki artı (+) işaretine tıklayın",
            "4. Modül arama kutusuna \"Webhooks\" yazın ve Webhooks modülünü seçin",
            "5. \"Custom webhook\" seçeneğini işaretleyin",
            "6. \"Add\" butonuyla yeni bir webhook oluşturun, size özel bir URL gösterilecek",
            "7. Bu URL'i kopyalayıp \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://hook.eu1.make.com/YOUR_HOOK_ID",
    },
    WebhookTemplate {
        kind: WebhookType::Notion,
        name: "Notion",
        description: "Notion veritabanına otomatik ekle",
        icon: "📑",
        briefing: "Notion, not alma, proje yönetimi ve bilgi tabanları için hepsi bir arada bir çalışma alanıdır. EchoDay görevlerinizi otomatik olarak Notion veritabanınıza aktarın.",
        use_cases: &[
            "Görev veritabanı oluştur",
            "Proje dokümantasyonunu güncelle",
            "Haftalık raporları arşivle",
            "Bilgi tabanlarını zenginleştir",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. https://www.notion.so/my-integrations adresini açın",
            "2. \"+ New integration\" (Yeni Entegrasyon) butonuna tıklayın",
            "3. Entegrasyona anlamlı bir isim verin (isteğe bağlı: logo yükleyebilirsiniz)",
            "4. Çalışacağı workspace'i seçin ve \"Submit\" butonuna basın",
            "5. \"Internal Integration Token\" alanındaki token'ı kopyalayın (sadece bir kez görünür!)",
            "6. Veritabanını açın, sağ üstten \"...\" -> \"Add connections\" -> entegrasyonunuzu seçin",
            "7. Token'ı ilgili alana yapıştırın (URL: https://api.notion.com/v1/pages)",
        ],
        example_url: "https://api.notion.com/v1/pages",
    },
    WebhookTemplate {
        kind: WebhookType::Trello,
        name: "Trello",
        description: "Trello kartlarına otomatik ekle",
        icon: "📋",
        briefing: "Trello, Kanban tabanlı popüler bir proje yönetim aracıdır. EchoDay görevlerinizi Trello kartları olarak otomatik oluşturun ve iş akışınızı görselleştirin.",
        use_cases: &[
            "Görevleri Trello kartı olarak ekle",
            "Sprint planlarını güncelle",
            "Takım panosunu senkronize et",
            "Proje ilerlemesini takip et",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. https://trello.com/power-ups/admin adresini açın",
            "2. \"New\" (Yeni) butonuna tıklayarak yeni bir Power-Up oluşturun",
            "3. Power-Up'a bir isim verin",
            "4. https://trello.com/app-key adresinden API Key'inizi görün",
            "5. Aynı sayfada \"Token\" linkine tıklayarak yetkilendirme yapın ve Token alın",
            "6. URL formatı: https://api.trello.com/1/cards?key=SIZIN_KEY&token=SIZIN_TOKEN",
            "7. URL'i kendi Key ve Token'ınız ile doldurup \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://api.trello.com/1/cards",
    },
    WebhookTemplate {
        kind: WebhookType::Asana,
        name: "Asana",
        description: "Asana projelerine görev ekle",
        icon: "✔️",
        briefing: "Asana, kurumsal takımlar için güçlü bir proje ve görev yönetim platformudur. EchoDay görevlerinizi Asana projelerine otomatik olarak aktararak merkezi bir sistem oluşturun.",
        use_cases: &[
            "Görevleri Asana'ya senkronize et",
            "Proje kilometre taşlarını güncelle",
            "Takım üyelerine görev ata",
            "Rapor ve analiz için veri topla",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. https://app.asana.com/0/my-apps adresini açın (Asana hesabınıza giriş yapın)",
            "2. \"Personal access tokens\" bölümünü bulun",
            "3. \"+ Create new token\" (Yeni Token Oluştur) butonuna tıklayın",
            "4. Token'a anlamlı bir isim verin (ör: \"EchoDay Integration\")",
            "5. \"Create token\" butonuna basın (DİKKAT: token sadece bir kez gösterilir!)",
            "6. Görünen token'ı hemen kopyalayın ve güvenli bir yere kaydedin",
            "7. URL alanına https://app.asana.com/api/1.0/tasks yazın",
        ],
        example_url: "https://app.asana.com/api/1.0/tasks",
    },
    WebhookTemplate {
        kind: WebhookType::N8n,
        name: "n8n",
        description: "Self-hosted workflow automation",
        icon: "🤖",
        briefing: "n8n, açık kaynaklı ve self-hosted bir otomasyon aracıdır. Kendi sunucunuzda çalıştırarak tam kontrol sağlayın ve EchoDay'i 200+ hizmetle entegre edin.",
        use_cases: &[
            "Özel sunucuda otomasyon",
            "Gizlilik odaklı entegrasyonlar",
            "Karmaşık iş akışları",
            "Maliyet etkin çözüm",
        ],
        default_settings: AUTOMATION,
        setup_instructions: &[
            "1. Kendi n8n sunucunuzu açın (isteğe bağlı: cloud.n8n.io kullanabilirsiniz)",
            "2. \"+ New Workflow\" (Yeni İş Akışı) butonuna tıklayın",
            "3. Node listesinden \"Webhook\" node'unu canvas'a sürükleyin",
            "4. Webhook node'una tıklayın, sağ panelde \"Webhook URL\" göreceksiniz",
            "5. \"Copy URL\" butonuyla URL'i kopyalayın",
            "6. Sağ üstten workflow'u \"Active\" yapın",
            "7. Kopyaladığınız URL'i \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://your-n8n-instance.com/webhook/your-webhook-id",
    },
    WebhookTemplate {
        kind: WebhookType::Pabbly,
        name: "Pabbly Connect",
        description: "Otomasyon ve entegrasyon platformu",
        icon: "🔗",
        briefing: "Pabbly Connect, uygun fiyatlı ve kullanıcı dostu bir otomasyon platformudur. Sınırsız iş akışı ile EchoDay verilerinizi diğer uygulamalarla entegre edin.",
        use_cases: &[
            "Bütçe dostu otomasyon",
            "Çoklu uygulama bağlantısı",
            "E-posta pazarlama entegrasyonu",
            "CRM ve satış otomasyonu",
        ],
        default_settings: AUTOMATION,
        setup_instructions: &[
            "1. https://www.pabbly.com/connect/ adresini açın ve hesabınıza giriş yapın",
            "2. \"Create Workflow\" butonuna tıklayın",
            "3. Workflow'a anlamlı bir isim verin ve kaydedin",
            "4. \"Trigger\" bölümünde \"Webhook\" seçeneğini seçin",
            "5. \"Webhook URL\" kısmındaki size özel URL'i kopyalayın",
            "6. \"Action\" kısmında verileri göndereceğiniz uygulamayı yapılandırın",
            "7. Kopyaladığınız webhook URL'ini \"Webhook URL\" alanına yapıştırın",
        ],
        example_url: "https://connect.pabbly.com/workflow/sendwebhookdata/xxx",
    },
    WebhookTemplate {
        kind: WebhookType::GoogleChat,
        name: "Google Chat",
        description: "Google Chat odalarına mesaj",
        icon: "🗨️",
        briefing: "Google Chat, Google Workspace'in entegre mesajlaşma çözümüdür. Gmail, Calendar ve Drive ile entegre çalışan bir ortamda EchoDay bildirimlerini alın.",
        use_cases: &[
            "Workspace takımlarına bildirim",
            "Google ekosistemi entegrasyonu",
            "Kurumsal iletişim",
            "Proje odalarına güncellemeler",
        ],
        default_settings: CHAT,
        setup_instructions: &[
            "1. Google Chat uygulamasını veya chat.google.com adresini açın",
            "2. Webhook eklemek istediğiniz odaya (space) gidin",
            "3. Oda adının yanındaki üç nokta (...) menüsünü tıklayın",
            "4. \"Apps & integrations\" seçeneğini bulun",
            "5. \"Webhooks\" sekmesinde \"Add webhook\" butonuna tıklayın",
            "6. Webhook'a anlamlı bir isim verin (ör: \"EchoDay Bildirimleri\")",
            "7. \"Save\" butonuna basın, görünen URL'i kopyalayın ve yapıştırın",
        ],
        example_url: "https://chat.googleapis.com/v1/spaces/xxx/messages",
    },
    WebhookTemplate {
        kind: WebhookType::Generic,
        name: "Özel Webhook",
        description: "Kendi API endpoint'ini ekle",
        icon: "🔧",
        briefing: "Özel webhook ile kendi API endpoint'inizi bağlayabilirsiniz. Kendi sistemleriniz, özel uygulamalarınız veya herhangi bir HTTP API ile entegrasyon sağlayın.",
        use_cases: &[
            "Özel iç sistemlere bağlantı",
            "Custom API entegrasyonu",
            "Mikro servis mimarileri",
            "Geliştirme ve test ortamları",
        ],
        default_settings: CUSTOM,
        setup_instructions: &[
            "1. Kendi API endpoint'inizi hazırlayın",
            "2. Endpoint'in HTTP POST metodunu kabul ettiğinden emin olun",
            "3. JSON gövde kabul ettiğini doğrulayın (ör: {\"event\": \"...\", \"data\": {...}})",
            "4. Gerekirse kimlik bilgisini URL'e ekleyin",
            "5. Endpoint'inizi test edin (Postman veya curl ile)",
            "6. Tam URL'i \"Webhook URL\" alanına yapıştırın",
            "Not: Bu seçenek teknik bilgi gerektirir, emin değilseniz hazır servislerden birini seçin",
        ],
        example_url: "https://api.example.com/webhook",
    },
];
