use super::{Secret, strs};

fn secret(name: &str, description: &str, regex: &str, false_positives: &[&str], poc: &str) -> Secret {
    Secret {
        name: name.to_string(),
        description: description.to_string(),
        regex: regex.to_string(),
        false_positives: strs(false_positives),
        poc: poc.to_string(),
    }
}

const PLACEHOLDERS: &[&str] = &["example", "xxxx", "placeholder", "your_", "dummy", "sample"];

pub fn default_secrets() -> Vec<Secret> {
    vec![
        secret(
            "AWS Access Key",
            "Amazon Web Services access key ID",
            r"(A3T[A-Z0-9]|AKIA|AGPA|AIDA|AROA|AIPA|ANPA|ANVA|ASIA)[A-Z0-9]{16}",
            &["akiaiosfodnn7example"],
            "aws sts get-caller-identity",
        ),
        secret(
            "AWS Secret Key",
            "Amazon Web Services secret access key",
            r#"(?i)aws(.{0,20})?(secret|private)?(.{0,20})?['"][0-9a-zA-Z/+]{40}['"]"#,
            PLACEHOLDERS,
            "aws sts get-caller-identity",
        ),
        secret(
            "AWS S3 Bucket",
            "Amazon S3 bucket URL",
            r"[a-z0-9.-]+\.s3\.amazonaws\.com|[a-z0-9.-]+\.s3-[a-z0-9-]+\.amazonaws\.com|s3://[a-z0-9.-]+",
            &[],
            "aws s3 ls s3://<bucket> --no-sign-request",
        ),
        secret(
            "Google API Key",
            "Google Cloud / Maps API key",
            r"AIza[0-9A-Za-z_-]{35}",
            &[],
            "https://maps.googleapis.com/maps/api/geocode/json?latlng=40,30&key=<KEY>",
        ),
        secret(
            "Google OAuth Client ID",
            "Google OAuth 2.0 client identifier",
            r"[0-9]+-[0-9a-z_]{32}\.apps\.googleusercontent\.com",
            &[],
            "",
        ),
        secret(
            "Google OAuth Access Token",
            "Short-lived Google OAuth access token",
            r"ya29\.[0-9A-Za-z_-]+",
            &[],
            "https://www.googleapis.com/oauth2/v1/tokeninfo?access_token=<TOKEN>",
        ),
        secret(
            "Firebase Database",
            "Firebase realtime database URL",
            r"[a-z0-9.-]+\.firebaseio\.com",
            &[],
            "https://<project>.firebaseio.com/.json",
        ),
        secret(
            "GitHub Token",
            "GitHub personal access, OAuth or app token",
            r"(ghp|gho|ghu|ghs|ghr)_[0-9A-Za-z]{36}",
            &[],
            "curl -H 'Authorization: token <TOKEN>' https://api.github.com/user",
        ),
        secret(
            "GitHub Fine-Grained Token",
            "GitHub fine-grained personal access token",
            r"github_pat_[0-9A-Za-z_]{82}",
            &[],
            "curl -H 'Authorization: Bearer <TOKEN>' https://api.github.com/user",
        ),
        secret(
            "GitLab Token",
            "GitLab personal access token",
            r"glpat-[0-9A-Za-z_-]{20}",
            &[],
            "curl -H 'PRIVATE-TOKEN: <TOKEN>' https://gitlab.com/api/v4/user",
        ),
        secret(
            "Slack Token",
            "Slack bot, user or app token",
            r"xox[baprs]-[0-9A-Za-z]{10,48}(-[0-9A-Za-z]{10,48})*",
            &[],
            "curl -sX POST 'https://slack.com/api/auth.test?token=<TOKEN>'",
        ),
        secret(
            "Slack Webhook",
            "Slack incoming webhook URL",
            r"https://hooks\.slack\.com/services/T[0-9A-Za-z_]{8,}/B[0-9A-Za-z_]{8,}/[0-9A-Za-z_]{24}",
            &[],
            "curl -X POST -H 'Content-type: application/json' --data '{\"text\":\"poc\"}' <URL>",
        ),
        secret(
            "Discord Webhook",
            "Discord channel webhook URL",
            r"https://discord(app)?\.com/api/webhooks/[0-9]{17,20}/[0-9A-Za-z_-]{60,68}",
            &[],
            "",
        ),
        secret(
            "Stripe Secret Key",
            "Stripe live or test secret key",
            r"(sk|rk)_(live|test)_[0-9a-zA-Z]{24,99}",
            &[],
            "curl https://api.stripe.com/v1/charges -u <KEY>:",
        ),
        secret(
            "Stripe Publishable Key",
            "Stripe publishable key",
            r"pk_(live|test)_[0-9a-zA-Z]{24,99}",
            &[],
            "",
        ),
        secret(
            "Twilio API Key",
            "Twilio API key SID",
            r"SK[0-9a-fA-F]{32}",
            &[],
            "",
        ),
        secret(
            "Twilio Account SID",
            "Twilio account identifier",
            r"AC[a-zA-Z0-9_-]{32}",
            &[],
            "",
        ),
        secret(
            "SendGrid API Key",
            "SendGrid API key",
            r"SG\.[0-9A-Za-z_-]{22}\.[0-9A-Za-z_-]{43}",
            &[],
            "curl -H 'Authorization: Bearer <KEY>' https://api.sendgrid.com/v3/scopes",
        ),
        secret(
            "Mailgun API Key",
            "Mailgun private API key",
            r"key-[0-9a-zA-Z]{32}",
            &[],
            "curl --user 'api:<KEY>' https://api.mailgun.net/v3/domains",
        ),
        secret(
            "Mailchimp API Key",
            "Mailchimp API key",
            r"[0-9a-f]{32}-us[0-9]{1,2}",
            &[],
            "curl --request GET --url 'https://<dc>.api.mailchimp.com/3.0/' --user 'any:<KEY>'",
        ),
        secret(
            "Shopify Token",
            "Shopify access, custom or private app token",
            r"shp(at|ca|pa|ss)_[a-fA-F0-9]{32}",
            &[],
            "",
        ),
        secret(
            "Square Access Token",
            "Square OAuth access token",
            r"sq0atp-[0-9A-Za-z_-]{22}",
            &[],
            "",
        ),
        secret(
            "Square OAuth Secret",
            "Square OAuth application secret",
            r"sq0csp-[0-9A-Za-z_-]{43}",
            &[],
            "",
        ),
        secret(
            "PayPal Braintree Token",
            "Braintree production access token",
            r"access_token\$production\$[0-9a-z]{16}\$[0-9a-f]{32}",
            &[],
            "",
        ),
        secret(
            "Heroku API Key",
            "Heroku platform API key",
            r"(?i)heroku(.{0,20})?[0-9A-F]{8}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{4}-[0-9A-F]{12}",
            &[],
            "curl -n https://api.heroku.com/account -H 'Authorization: Bearer <KEY>'",
        ),
        secret(
            "Facebook Access Token",
            "Facebook Graph API access token",
            r"EAACEdEose0cBA[0-9A-Za-z]+",
            &[],
            "https://graph.facebook.com/me?access_token=<TOKEN>",
        ),
        secret(
            "Telegram Bot Token",
            "Telegram bot API token",
            r"[0-9]{8,10}:AA[0-9A-Za-z_-]{33}",
            &[],
            "https://api.telegram.org/bot<TOKEN>/getMe",
        ),
        secret(
            "NPM Token",
            "npm registry access token",
            r"npm_[0-9A-Za-z]{36}",
            &[],
            "",
        ),
        secret(
            "Private Key",
            "PEM encoded private key",
            r"-----BEGIN (RSA |EC |DSA |OPENSSH |PGP )?PRIVATE KEY( BLOCK)?-----",
            &[],
            "",
        ),
        secret(
            "JSON Web Token",
            "Signed JWT",
            r"eyJ[A-Za-z0-9_-]{10,}\.eyJ[A-Za-z0-9_-]{10,}\.[A-Za-z0-9_-]{10,}",
            &[],
            "https://jwt.io",
        ),
        secret(
            "Basic Auth Credentials",
            "Credentials embedded in a URL",
            r"[a-zA-Z][a-zA-Z0-9+.-]{2,}://[^/\s:@]{3,20}:[^/\s:@]{3,20}@[0-9A-Za-z.-]+",
            &["user:pass", "username:password", "user:password"],
            "",
        ),
        secret(
            "Authorization Bearer",
            "Bearer token in source",
            r"(?i)bearer\s+[0-9a-zA-Z_\-.=]{20,}",
            &["bearer token", "undefined", "null"],
            "",
        ),
        secret(
            "Generic API Key",
            "Hardcoded API key assignment",
            r#"(?i)(api_key|apikey|api-key|x-api-key)['"]?\s*[:=]\s*['"][0-9a-zA-Z_\-]{16,64}['"]"#,
            PLACEHOLDERS,
            "",
        ),
        secret(
            "Generic Secret",
            "Hardcoded secret or password assignment",
            r#"(?i)(secret|passwd|password|client_secret|access_token)['"]?\s*[:=]\s*['"][^'"\s]{8,64}['"]"#,
            &[
                "example",
                "xxxx",
                "placeholder",
                "your_",
                "password123",
                "********",
                "{{",
                "${",
                "type=",
                "required",
            ],
            "",
        ),
        secret(
            "Azure Storage Key",
            "Azure storage account connection string",
            r"DefaultEndpointsProtocol=https?;AccountName=[a-z0-9]+;AccountKey=[0-9A-Za-z+/=]{88}",
            &[],
            "",
        ),
        secret(
            "Cloudinary URL",
            "Cloudinary credentials URL",
            r"cloudinary://[0-9]{15}:[0-9A-Za-z_-]+@[a-z0-9]+",
            &[],
            "",
        ),
        secret(
            "Mapbox Token",
            "Mapbox secret access token",
            r"sk\.eyJ[0-9A-Za-z_-]{50,}\.[0-9A-Za-z_-]{20,}",
            &[],
            "",
        ),
    ]
}
